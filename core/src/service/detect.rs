use crate::config::DetectorConfig;

/// Quick check that a text snippet comes from a Sage ENDEC export.
///
/// Inputs that fail this check are still run through the engine; callers only
/// warn about them.
pub struct SageDetector<'a> {
    config: &'a DetectorConfig,
}

impl<'a> SageDetector<'a> {
    pub fn new(config: &'a DetectorConfig) -> Self {
        Self { config }
    }

    /// Markers found in `snippet`, in configured order.
    pub fn hits<'s>(&'s self, snippet: &str) -> Vec<&'s str> {
        self.config
            .markers
            .iter()
            .filter(|m| !m.is_empty() && snippet.contains(m.as_str()))
            .map(String::as_str)
            .collect()
    }

    pub fn looks_like_sage(&self, snippet: &str) -> bool {
        let hits = self.hits(snippet).len();
        hits > 0 && hits >= self.config.min_hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_sage_markers() {
        let config = DetectorConfig::default();
        let detector = SageDetector::new(&config);

        let snippet = r#"<Entry><Code>ZCZC-EAS-RWT-000000+0015</Code><Details>Received on Monitor 1</Details>"#;
        assert!(detector.looks_like_sage(snippet));
        assert_eq!(detector.hits(snippet), vec!["-RWT-", "Received on Monitor"]);

        assert!(!detector.looks_like_sage("id,name,amount\n1,foo,3.50\n"));
    }

    #[test]
    fn test_min_hits_threshold() {
        let config = DetectorConfig {
            markers: vec!["ENDEC".to_string(), "-RMT-".to_string()],
            min_hits: 2,
        };
        let detector = SageDetector::new(&config);
        assert!(!detector.looks_like_sage("ENDEC model 3644"));
        assert!(detector.looks_like_sage("ENDEC ZCZC-EAS-RMT-"));
    }
}
