use crate::validation::TextEnum;
use serde::Serialize;

/// Known model architectures
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ModelName {
    Alexnet,
    Resnet,
    Other,
}

impl ModelName {
    pub const fn message(self) -> &'static str {
        match self {
            Self::Alexnet => "AlexNet Deep Learning model",
            Self::Resnet => "ResNet Deep Learning model",
            Self::Other => "have some residuals",
        }
    }
}

impl TextEnum for ModelName {
    const VARIANTS: &'static [Self] = &[Self::Alexnet, Self::Resnet, Self::Other];

    fn as_str(self) -> &'static str {
        match self {
            Self::Alexnet => "alexnet",
            Self::Resnet => "resnet",
            Self::Other => "other",
        }
    }
}

/// Files that may be read back through the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum FileReference {
    #[serde(rename = "files/models.json")]
    Models,
}

impl TextEnum for FileReference {
    const VARIANTS: &'static [Self] = &[Self::Models];

    fn as_str(self) -> &'static str {
        match self {
            Self::Models => "files/models.json",
        }
    }
}
