pub mod asset_uploader;
pub mod auth_resolver;
pub mod content_renderer;
pub mod editor_injector;
pub mod failure_writer;

pub use asset_uploader::{Asset, AssetUploader, MpAssetUploader, UploadResult};
pub use auth_resolver::{AuthSource, PageAuthResolver};
pub use content_renderer::{Body, ContentRenderer};
pub use editor_injector::{EditorInjector, EditorSurface, PageSurface, SurfaceTarget};
pub use failure_writer::FailureWriter;
