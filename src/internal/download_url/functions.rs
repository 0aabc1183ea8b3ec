pub mod construct_download_url;
