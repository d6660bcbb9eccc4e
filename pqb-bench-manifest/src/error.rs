use thiserror::Error;

#[derive(Debug, Error)]
pub enum ManifestError {
    #[error("Node list is empty, nothing to deploy")]
    NoNodes,

    #[error("Host port {port} for node{index} exceeds 65535")]
    PortOutOfRange { index: usize, port: u32 },
}
