use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::integration::{ClassNames, PREVIEW_SIZE, PipelineConfig};
use crate::session::PendingVideo;
use crate::spot::FrameSize;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config")]
    Parse(#[from] serde_yaml::Error),
}

/// Service-wide settings, loaded from YAML.
///
/// Every field has a default, so a partial file (or none) is fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    /// Where uploads and their preview frames are stored
    pub upload_dir: PathBuf,
    /// Where processed videos are served from
    pub download_dir: PathBuf,
    pub preview_size: FrameSize,
    pub class_names: ClassNames,
    pub pipeline: PipelineConfig,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            upload_dir: PathBuf::from("resources/videos"),
            download_dir: PathBuf::from("resources/downloaded"),
            preview_size: PREVIEW_SIZE,
            class_names: ClassNames::parking(),
            pipeline: PipelineConfig::default(),
        }
    }
}

impl ServiceConfig {
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml(&contents)
    }

    pub fn from_yaml(contents: &str) -> Result<Self, ConfigError> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// Describe a freshly stored upload: the file sits in `upload_dir`, its
    /// preview uses `preview_size` and the processed video goes to
    /// `download_dir`.
    pub fn pending_video(
        &self,
        file_name: impl AsRef<Path>,
        frame_size: FrameSize,
    ) -> PendingVideo {
        PendingVideo::new(self.upload_dir.join(file_name), frame_size, self.preview_size)
            .with_output_dir(&self.download_dir)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_yaml() {
        let config = ServiceConfig::from_yaml(
            r#"
upload_dir: /tmp/uploads
pipeline:
  track_vehicles: false
  finder:
    free_label: empty
    min_confidence: 0.4
"#,
        )
        .unwrap();

        assert_eq!(config.upload_dir, PathBuf::from("/tmp/uploads"));
        assert_eq!(config.download_dir, PathBuf::from("resources/downloaded"));
        assert!(!config.pipeline.track_vehicles);
        assert_eq!(config.pipeline.finder.free_label, "empty");
        assert_eq!(config.pipeline.finder.min_confidence, 0.4);
        assert_eq!(config.pipeline.vehicle_class_ids, vec![2, 3, 5, 7]);
        assert_eq!(config.preview_size, FrameSize::new(960, 540));
    }

    #[test]
    fn test_class_names_and_frame() {
        let config = ServiceConfig::from_yaml(
            r#"
class_names:
  0: free
  1: occupied
  2: car
pipeline:
  finder:
    frame: { width: 1280, height: 720 }
"#,
        )
        .unwrap();
        assert_eq!(config.class_names.name(2), "car");
        assert_eq!(
            config.pipeline.finder.frame,
            Some(FrameSize::new(1280, 720))
        );
    }

    #[test]
    fn test_pending_video_uses_dirs() {
        let config = ServiceConfig::from_yaml(
            r#"
upload_dir: /srv/uploads
download_dir: /srv/processed
preview_size: { width: 640, height: 360 }
"#,
        )
        .unwrap();

        let video = config.pending_video("lot.mp4", FrameSize::new(1280, 720));
        assert_eq!(video.path, PathBuf::from("/srv/uploads/lot.mp4"));
        assert_eq!(video.preview_size, FrameSize::new(640, 360));
        assert_eq!(video.frame_size, FrameSize::new(1280, 720));
        assert_eq!(
            video.processed_path(),
            PathBuf::from("/srv/processed/processed_lot.mp4")
        );
    }

    #[test]
    fn test_empty_is_default() {
        assert_eq!(
            ServiceConfig::from_yaml("{}").unwrap(),
            ServiceConfig::default()
        );
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            ServiceConfig::from_yaml("pipeline: [1, 2"),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = ServiceConfig::load("/nonexistent/parkspot.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
