#[cfg(feature = "mock")]
use crate::MockSport;
use crate::{Result, SportClient, SportError};
use std::time::Duration;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum SportBackendKind {
    Mock,
    Go2,
}

impl SportBackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SportBackendKind::Mock => "mock",
            SportBackendKind::Go2 => "go2",
        }
    }
}

pub fn new_sport_client(
    kind: SportBackendKind,
    interface: &str,
    timeout: Duration,
) -> Result<Box<dyn SportClient + Send>> {
    match kind {
        SportBackendKind::Mock => {
            #[cfg(feature = "mock")]
            {
                MockSport::open(interface, timeout)
                    .map(|s| Box::new(s) as Box<dyn SportClient + Send>)
            }
            #[cfg(not(feature = "mock"))]
            {
                let _ = (interface, timeout);
                Err(SportError::Unsupported("mock feature not enabled"))
            }
        }
        SportBackendKind::Go2 => {
            let _ = (interface, timeout);
            Err(SportError::Unsupported("go2 sport bridge not yet integrated"))
        }
    }
}
