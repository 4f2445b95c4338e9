use std::fmt;

/// Page elements the controller reads from or writes to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ElementId {
    Map,
    AreaInfo,
    ProcessingAnimation,
    TreeCount,
    AreaCovered,
    TreeDensity,
    ImageResolution,
    TreeChart,
    UploadedImage,
    DownloadProcessedImage,
    UploadForm,
    ImageUpload,
    ConfidenceThreshold,
    ConfidenceValue,
    UpdateAnalysis,
}

impl ElementId {
    pub const ALL: [ElementId; 15] = [
        ElementId::Map,
        ElementId::AreaInfo,
        ElementId::ProcessingAnimation,
        ElementId::TreeCount,
        ElementId::AreaCovered,
        ElementId::TreeDensity,
        ElementId::ImageResolution,
        ElementId::TreeChart,
        ElementId::UploadedImage,
        ElementId::DownloadProcessedImage,
        ElementId::UploadForm,
        ElementId::ImageUpload,
        ElementId::ConfidenceThreshold,
        ElementId::ConfidenceValue,
        ElementId::UpdateAnalysis,
    ];

    /// DOM id of the element
    pub const fn as_str(&self) -> &'static str {
        match self {
            ElementId::Map => "map",
            ElementId::AreaInfo => "areaInfo",
            ElementId::ProcessingAnimation => "processingAnimation",
            ElementId::TreeCount => "treeCount",
            ElementId::AreaCovered => "areaCovered",
            ElementId::TreeDensity => "treeDensity",
            ElementId::ImageResolution => "imageResolution",
            ElementId::TreeChart => "treeChart",
            ElementId::UploadedImage => "uploadedImage",
            ElementId::DownloadProcessedImage => "downloadProcessedImage",
            ElementId::UploadForm => "uploadForm",
            ElementId::ImageUpload => "imageUpload",
            ElementId::ConfidenceThreshold => "confidenceThreshold",
            ElementId::ConfidenceValue => "confidenceValue",
            ElementId::UpdateAnalysis => "updateAnalysis",
        }
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
