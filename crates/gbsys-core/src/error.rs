use thiserror::Error;

#[derive(Debug, Error)]
pub enum SysError {
    #[error("couldn't initialize host video: {0}")]
    Init(String),

    #[error("can't create window: {0}")]
    Window(String),

    #[error("can't create renderer: {0}")]
    Renderer(String),

    #[error("surface error: {0}")]
    Surface(String),

    #[error("texture error: {0}")]
    Texture(String),

    #[error("audio error: {0}")]
    Audio(String),

    #[error("video backend not initialized")]
    NotInitialized,

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}
