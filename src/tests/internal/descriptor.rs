use serde_json::json;

use crate::file_descriptor::{DescriptorError, FileDescriptor, FileType};

#[test]
fn parses_backend_document() {
    let doc = json!({
        "$id": "doc-1",
        "$createdAt": "2024-11-02T09:30:00.000+00:00",
        "bucketFileId": "6720f1a2",
        "name": "holiday.mov",
        "type": "video",
        "size": 73400320,
        "extension": "mov",
        "url": "https://cloud.example.com/v1/storage/buckets/files/files/6720f1a2/view",
        "owner": { "fullName": "Ada Lovelace", "email": "ada@example.com" }
    });

    let file = FileDescriptor::from_document(doc).unwrap();

    assert_eq!(file.id.as_deref(), Some("doc-1"));
    assert_eq!(file.bucket_file_id, "6720f1a2");
    assert_eq!(file.file_type, FileType::Video);
    assert_eq!(file.size, 73_400_320);
    assert_eq!(file.extension.as_deref(), Some("mov"));
    assert!(file.created_at.is_some());
    assert_eq!(file.owner_name(), Some("Ada Lovelace"));
    assert!(file.validate().is_ok());
}

#[test]
fn unknown_type_tag_is_kept() {
    let doc = json!({ "bucketFileId": "a", "name": "b", "type": "archive", "size": 1 });
    let file = FileDescriptor::from_document(doc).unwrap();
    assert_eq!(file.file_type, FileType::Other("archive".into()));
    assert_eq!(file.file_type.to_string(), "archive");
}

#[test]
fn missing_required_field_is_a_parse_error() {
    let doc = json!({ "name": "b", "type": "image", "size": 1 });
    assert!(matches!(
        FileDescriptor::from_document(doc),
        Err(DescriptorError::Parse(_))
    ));
}

#[test]
fn blank_owner_name_fails_validation() {
    let doc = json!({
        "bucketFileId": "a", "name": "b", "type": "image", "size": 1,
        "owner": { "fullName": "   " }
    });
    let file = FileDescriptor::from_document(doc).unwrap();
    assert!(matches!(file.validate(), Err(DescriptorError::MissingOwner)));

    let no_name = FileDescriptor::from_document(json!({
        "bucketFileId": "a", "name": "b", "type": "image", "size": 1, "owner": {}
    }))
    .unwrap();
    assert!(no_name.validate().is_err());
}
