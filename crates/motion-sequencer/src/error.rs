use audio_cue::AudioError;
use thiserror::Error;

pub type Result<T, E = RoutineError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum RoutineError {
    #[error("audio cue")]
    Audio(#[from] AudioError),
    #[error("routine `{routine}` is misconfigured: {reason}")]
    Misconfigured {
        routine: String,
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_audio_cause_reported_once() {
        let err = anyhow::Error::from(RoutineError::from(AudioError::NoCues {
            dir: PathBuf::from("/cues/sad"),
            extensions: vec!["wav".to_string()],
        }));

        let chain = format!("{err:#}");
        assert!(chain.starts_with("audio cue: "));
        assert_eq!(chain.matches("no audio files").count(), 1);
    }
}
