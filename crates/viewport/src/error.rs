use axisview_assets::AssetError;
use axisview_common::RegionId;
use axisview_gizmo::GizmoError;
use axisview_render::RenderError;
use axisview_scene::SceneError;
use std::path::PathBuf;

/// Errors from bootstrapping and driving a viewport.
///
/// Any of these during bootstrap is fatal for that viewport. Nothing is
/// rolled back.
#[derive(Debug, thiserror::Error)]
pub enum ViewportError {
    #[error("region {0:?} already has a viewport")]
    AlreadyBootstrapped(RegionId),
    #[error("render loop already started")]
    LoopAlreadyStarted,
    #[error("cannot read config {path}: {source}")]
    ConfigIo {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_yaml::Error),
    #[error(transparent)]
    Scene(#[from] SceneError),
    #[error(transparent)]
    Asset(#[from] AssetError),
    #[error(transparent)]
    Gizmo(#[from] GizmoError),
    #[error(transparent)]
    Render(#[from] RenderError),
}
