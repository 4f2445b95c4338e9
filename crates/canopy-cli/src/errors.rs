use canopy_core::CanopyError;
use console::style;
use std::fmt;

/// Enhanced error type with suggestions
pub struct CliError {
    pub message: String,
    pub context: Option<String>,
    pub suggestions: Vec<String>,
    pub help_command: Option<String>,
}

impl CliError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
            help_command: None,
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_help(mut self, command: impl Into<String>) -> Self {
        self.help_command = Some(command.into());
        self
    }

    pub fn display(&self) {
        eprintln!("{} {}\n", style("✗").red().bold(), style(&self.message).red().bold());

        if let Some(ref context) = self.context {
            eprintln!("{}", context);
            eprintln!();
        }

        if !self.suggestions.is_empty() {
            eprintln!("{}", style("To fix this:").yellow().bold());
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                eprintln!("  {}. {}", i + 1, suggestion);
            }
            eprintln!();
        }

        if let Some(ref help_cmd) = self.help_command {
            eprintln!("{} {}", style("Need help?").cyan(), style(help_cmd).cyan().bold());
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for CliError {}

/// Create error for an image file that cannot be read
pub fn image_not_found(path: &str) -> CliError {
    CliError::new("Image file not found")
        .with_context(format!("The image to analyze could not be read.\n\nPath: {}", path))
        .with_suggestion("Check the file path and try again")
        .with_help("Run: canopy image --help")
}

/// Create error for a region that could not be drawn
pub fn invalid_region(reason: &str) -> CliError {
    CliError::new("Invalid region")
        .with_context(format!("The region could not be drawn on the map.\n\nReason: {}", reason))
        .with_suggestion("Bounding boxes are south,west,north,east in degrees")
        .with_suggestion("Polygons need at least three distinct lat,lng vertices separated by ';'")
        .with_help("Run: canopy area --help")
}

/// Create error for a rejected submission
pub fn nothing_to_analyze() -> CliError {
    CliError::new("Nothing to analyze")
        .with_context("Neither an image nor a usable region was provided.")
        .with_suggestion("Upload an image: canopy image photo.jpg")
        .with_suggestion("Or draw a region: canopy area --bbox 51.5,-0.1,51.51,-0.09")
}

/// Create error for a backend that cannot be reached
pub fn backend_unreachable(url: &str, reason: &str) -> CliError {
    CliError::new("Cannot reach the detection backend")
        .with_context(format!("The request could not be sent.\n\nURL: {}\nError: {}", url, reason))
        .with_suggestion("Check that the backend is running")
        .with_suggestion("Point to it with --server or CANOPY_SERVER_URL")
        .with_help("Run: canopy config")
}

/// Create error for a failed analysis
pub fn analysis_failed(error: &CanopyError) -> CliError {
    match error {
        CanopyError::Transport { url, reason } => backend_unreachable(url, reason),
        CanopyError::Http { status, status_text, body } => CliError::new("Analysis failed")
            .with_context(format!(
                "The backend answered {} {}.\n\n{}",
                status, status_text, body
            ))
            .with_suggestion("Check the backend logs for details"),
        other if other.is_backend() => CliError::new("Analysis failed")
            .with_context(format!("Error: {}", other))
            .with_suggestion("Check that the server is a tree detection backend"),
        other => CliError::new("Analysis failed").with_context(format!("Error: {}", other)),
    }
}

/// Create error for invalid configuration
pub fn invalid_config(reason: &str) -> CliError {
    CliError::new("Invalid configuration")
        .with_context(format!("Configuration value is invalid.\n\nReason: {}", reason))
        .with_suggestion("Check canopy.toml for syntax errors")
        .with_suggestion("Or check CANOPY_* environment variables")
        .with_help("Run: canopy config")
}

/// Convert anyhow::Error to CliError with context
pub fn from_anyhow(error: anyhow::Error) -> CliError {
    let error = match error.downcast::<CliError>() {
        Ok(cli_error) => return cli_error,
        Err(error) => error,
    };

    if let Some(canopy_error) = error.downcast_ref::<CanopyError>() {
        match canopy_error {
            CanopyError::ConfigInvalid { .. } => {
                return invalid_config(&format!("{:#}", error))
            }
            CanopyError::InvalidCoordinates { .. } | CanopyError::InvalidGeometry { .. } => {
                return invalid_region(&canopy_error.to_string())
            }
            _ => {}
        }
    }

    let message = format!("{:#}", error);

    if message.contains("No such file or directory") {
        CliError::new("File not found")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check the file path and try again")
    } else if message.contains("permission denied") {
        CliError::new("Permission denied")
            .with_context(format!("Error: {}", message))
            .with_suggestion("Check file permissions")
            .with_suggestion("Or run with appropriate privileges")
    } else {
        CliError::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;

    #[test]
    fn test_cli_error_passes_through() {
        let error = anyhow::Error::new(nothing_to_analyze());
        assert_eq!(from_anyhow(error).message, "Nothing to analyze");
    }

    #[test]
    fn test_geometry_error_becomes_invalid_region() {
        let error: anyhow::Result<()> = Err(CanopyError::InvalidGeometry {
            reason: "too few vertices".to_string(),
        })
        .context("Failed to read --polygon");

        let cli_error = from_anyhow(error.unwrap_err());
        assert_eq!(cli_error.message, "Invalid region");
        assert!(cli_error.context.unwrap().contains("too few vertices"));
    }

    #[test]
    fn test_transport_error_suggests_server_flag() {
        let error = CanopyError::Transport {
            url: "http://127.0.0.1:5000/process_area".to_string(),
            reason: "connection refused".to_string(),
        };
        let cli_error = analysis_failed(&error);
        assert_eq!(cli_error.message, "Cannot reach the detection backend");
        assert!(cli_error.suggestions.iter().any(|s| s.contains("--server")));
    }

    #[test]
    fn test_config_error_becomes_invalid_config() {
        let error: anyhow::Result<()> = Err(CanopyError::ConfigInvalid {
            key: "confidence".to_string(),
            reason: "1.5 is outside 0..1".to_string(),
        })
        .context("Failed to load configuration file canopy.toml");

        let cli_error = from_anyhow(error.unwrap_err());
        assert_eq!(cli_error.message, "Invalid configuration");
        assert!(cli_error.context.unwrap().contains("1.5 is outside 0..1"));
    }

    #[test]
    fn test_decode_error_suggests_checking_backend() {
        let error = CanopyError::ResponseDecode("expected value".to_string());
        let cli_error = analysis_failed(&error);
        assert_eq!(cli_error.message, "Analysis failed");
        assert!(cli_error.suggestions.iter().any(|s| s.contains("tree detection backend")));
    }
}
