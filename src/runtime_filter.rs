use crate::AppError;

pub const DEFAULT_OUTDATED_RUNTIMES: [&str; 5] =
    ["python3.9", "python3.8", "python3.7", "python3.6", "python2.7"];

/// Exact-match allow-list of runtime identifiers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuntimeFilter {
    runtimes: Vec<String>,
}

impl RuntimeFilter {
    pub fn new<I, S>(runtimes: I) -> Result<Self, AppError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let runtimes: Vec<String> = runtimes.into_iter().map(Into::into).collect();
        if runtimes.is_empty() {
            return Err(AppError::Config(String::from("runtime list is empty")));
        }
        Ok(Self { runtimes })
    }

    /// Parses a comma-separated list, dropping blank entries.
    pub fn parse_list(raw: &str) -> Result<Self, AppError> {
        Self::new(raw.split(',').map(str::trim).filter(|rt| !rt.is_empty()))
    }

    pub fn matches(&self, runtime: &str) -> bool {
        self.runtimes.iter().any(|rt| rt == runtime)
    }

    pub fn runtimes(&self) -> &[String] {
        &self.runtimes
    }

    /// The provider-side disjunction selecting function ARNs, e.g.
    /// `Functions[?Runtime=='python3.9' || Runtime=='python3.8'].FunctionArn`.
    pub fn query_expression(&self) -> String {
        let predicates = self
            .runtimes
            .iter()
            .map(|rt| format!("Runtime=='{}'", rt))
            .collect::<Vec<_>>()
            .join(" || ");
        format!("Functions[?{}].FunctionArn", predicates)
    }
}

impl Default for RuntimeFilter {
    fn default() -> Self {
        Self {
            runtimes: DEFAULT_OUTDATED_RUNTIMES.iter().map(|rt| rt.to_string()).collect(),
        }
    }
}
