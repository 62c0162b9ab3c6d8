pub mod fetcher;
pub mod image_tag;
pub mod markdown_file;
pub mod paths;
