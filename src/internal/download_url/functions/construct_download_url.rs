use url::Url;

use crate::internal::download_url::structs::backend_config::BackendConfig;

/// 由存储文件 id 构造下载地址：
/// `{endpoint}/storage/buckets/{bucket_id}/files/{bucket_file_id}/download?project={project_id}`
///
/// 纯函数，相同输入得到相同地址。各路径段由 `url` 负责百分号编码，
/// 因此 id 中的 `/`、`?` 等字符不会改变路径结构。
pub fn construct_download_url(config: &BackendConfig, bucket_file_id: &str) -> Url {
    let mut url = config.endpoint.clone();
    {
        // endpoint 已在 BackendConfig 构造时确认可作为基础路径
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend([
                "storage",
                "buckets",
                config.bucket_id.as_str(),
                "files",
                bucket_file_id,
                "download",
            ]);
        }
    }
    url.query_pairs_mut()
        .clear()
        .append_pair("project", &config.project_id);
    url
}
