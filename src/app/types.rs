#[derive(Debug, Parser, Clone)]
#[command(
    name = "crawldeck",
    version,
    about = "Terminal dashboard for a web-crawl analysis service"
)]
struct Cli {
    #[arg(value_name = "BASE_URL", default_value = "http://localhost:8080/api")]
    base_url: String,

    /// Bearer token for the analysis service; falls back to CRAWLDECK_TOKEN.
    #[arg(long, value_name = "TOKEN")]
    token: Option<String>,

    #[arg(long, value_name = "MS", default_value_t = 3000)]
    poll_interval_ms: u64,

    #[arg(long, value_name = "MS", default_value_t = 10_000)]
    request_timeout_ms: u64,

    #[arg(short, long, value_name = "FILE")]
    output: Option<String>,

    #[arg(long, value_enum, default_value_t = FileFormatArg::Csv)]
    format: FileFormatArg,

    #[arg(long, default_value_t = false)]
    no_tui: bool,

    #[arg(long, default_value_t = false)]
    follow: bool,
}

const TOKEN_ENV_VAR: &str = "CRAWLDECK_TOKEN";

#[derive(Debug, Copy, Clone, ValueEnum, PartialEq, Eq)]
enum FileFormatArg {
    Csv,
    Json,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum DataFormat {
    Csv,
    Json,
}

impl From<FileFormatArg> for DataFormat {
    fn from(value: FileFormatArg) -> Self {
        match value {
            FileFormatArg::Csv => DataFormat::Csv,
            FileFormatArg::Json => DataFormat::Json,
        }
    }
}

/// Lifecycle status reported by the analysis service. The set is closed:
/// a response carrying any other value fails to decode and surfaces as a
/// transport error instead of an unknown status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
enum UrlStatus {
    Queued,
    Running,
    Done,
    Stopped,
    Error,
}

const ALL_STATUSES: [UrlStatus; 5] = [
    UrlStatus::Queued,
    UrlStatus::Running,
    UrlStatus::Done,
    UrlStatus::Stopped,
    UrlStatus::Error,
];

impl UrlStatus {
    fn label(self) -> &'static str {
        match self {
            UrlStatus::Queued => "queued",
            UrlStatus::Running => "running",
            UrlStatus::Done => "done",
            UrlStatus::Stopped => "stopped",
            UrlStatus::Error => "error",
        }
    }

    /// Start is offered from every state except `running`; the server
    /// treats start-while-running as an idempotent no-op anyway.
    fn can_start(self) -> bool {
        self != UrlStatus::Running
    }

    fn can_stop(self) -> bool {
        self == UrlStatus::Running
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TrackedUrl {
    id: u64,
    address: String,
    status: UrlStatus,
    #[serde(rename = "createdAt")]
    created_at: String,
    #[serde(rename = "updatedAt")]
    updated_at: String,
    /// Most recent first; index 0 is the latest analysis.
    #[serde(default)]
    results: Vec<AnalysisResult>,
}

impl TrackedUrl {
    fn latest_result(&self) -> Option<&AnalysisResult> {
        self.results.first()
    }

    /// (internal, external, broken) from the latest result, 0 when no
    /// analysis has completed yet.
    fn link_counts(&self) -> (usize, usize, usize) {
        self.latest_result()
            .map(|result| {
                (
                    result.internal_links,
                    result.external_links,
                    result.broken_links,
                )
            })
            .unwrap_or((0, 0, 0))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AnalysisResult {
    id: u64,
    html_version: String,
    title: String,
    #[serde(default)]
    headings: HashMap<String, usize>,
    internal_links: usize,
    external_links: usize,
    broken_links: usize,
    login_form: bool,
    created_at: String,
    #[serde(default)]
    links: Vec<Link>,
}

const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];

impl AnalysisResult {
    fn heading_count(&self, tag: &str) -> usize {
        self.headings.get(tag).copied().unwrap_or(0)
    }

    fn has_headings(&self) -> bool {
        self.headings.values().any(|count| *count > 0)
    }

    fn has_links(&self) -> bool {
        self.internal_links > 0 || self.external_links > 0 || self.broken_links > 0
    }

    fn broken(&self) -> impl Iterator<Item = &Link> {
        self.links.iter().filter(|link| link.broken)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct Link {
    id: u64,
    url: String,
    internal: bool,
    broken: bool,
    status: u16,
}

/// Pie-chart input for the details view: internal vs external share of
/// the latest analysis.
fn link_chart_data(result: &AnalysisResult) -> [(&'static str, usize); 2] {
    [
        ("Internal", result.internal_links),
        ("External", result.external_links),
    ]
}

/// The poll-arming predicate: refresh runs if and only if this holds.
fn any_running(urls: &[TrackedUrl]) -> bool {
    urls.iter().any(|url| url.status == UrlStatus::Running)
}

fn validate_address(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err("address is empty".to_string());
    }
    let parsed = Url::parse(trimmed).map_err(|e| format!("invalid URL: {e}"))?;
    if parsed.scheme() != "http" && parsed.scheme() != "https" {
        return Err(format!("unsupported scheme: {}", parsed.scheme()));
    }
    if parsed.host_str().is_none() {
        return Err("URL has no host".to_string());
    }
    Ok(trimmed.to_string())
}

/// Everything the worker can be asked to do. Mutating commands reload the
/// registry after the mutation's response has been observed.
#[derive(Debug)]
enum ApiCommand {
    Reload,
    Create(String),
    Update { id: u64, address: String },
    Delete(u64),
    Start(u64),
    Stop(u64),
    FetchDetails(u64),
    Shutdown,
}

#[derive(Debug)]
enum RegistryEvent {
    /// Full snapshot; replaces the cached registry wholesale.
    Registry(Vec<TrackedUrl>),
    Details(TrackedUrl),
    Status(String),
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UrlSortMode {
    Newest,
    Address,
    Status,
    BrokenLinks,
}

impl UrlSortMode {
    fn cycle(self) -> Self {
        match self {
            UrlSortMode::Newest => UrlSortMode::Address,
            UrlSortMode::Address => UrlSortMode::Status,
            UrlSortMode::Status => UrlSortMode::BrokenLinks,
            UrlSortMode::BrokenLinks => UrlSortMode::Newest,
        }
    }

    fn title(self) -> &'static str {
        match self {
            UrlSortMode::Newest => "newest",
            UrlSortMode::Address => "address",
            UrlSortMode::Status => "status",
            UrlSortMode::BrokenLinks => "broken_links",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    fn toggle(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }

    fn label(self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

/// Client-side view of the registry. Mutated only through `apply_event`,
/// which runs on the UI thread; render paths read it between events.
#[derive(Default)]
struct RegistryState {
    urls: Vec<TrackedUrl>,
    loaded: bool,
    details: Option<TrackedUrl>,
    errors: VecDeque<String>,
    status_messages: VecDeque<String>,
}

impl RegistryState {
    fn apply_event(&mut self, event: RegistryEvent) {
        match event {
            RegistryEvent::Registry(urls) => {
                self.urls = urls;
                self.loaded = true;
            }
            RegistryEvent::Details(url) => self.details = Some(url),
            RegistryEvent::Status(message) => self.push_status(message),
            RegistryEvent::Error(err) => self.push_error(err),
        }
    }

    fn push_error(&mut self, error: String) {
        self.errors.push_front(error);
        while self.errors.len() > 10 {
            self.errors.pop_back();
        }
    }

    fn push_status(&mut self, message: String) {
        self.status_messages.push_front(message);
        while self.status_messages.len() > 20 {
            self.status_messages.pop_back();
        }
    }

    fn polling_active(&self) -> bool {
        any_running(&self.urls)
    }

    fn status_counts(&self) -> [(UrlStatus, usize); 5] {
        ALL_STATUSES.map(|status| {
            let count = self.urls.iter().filter(|url| url.status == status).count();
            (status, count)
        })
    }

    fn sorted_urls(&self, sort: UrlSortMode, direction: SortDirection) -> Vec<&TrackedUrl> {
        let mut rows = self.urls.iter().collect::<Vec<_>>();
        match sort {
            UrlSortMode::Newest => {
                rows.sort_by(|a, b| b.id.cmp(&a.id));
                if direction == SortDirection::Asc {
                    rows.reverse();
                }
            }
            UrlSortMode::Address => {
                rows.sort_by(|a, b| a.address.cmp(&b.address).then(a.id.cmp(&b.id)));
                if direction == SortDirection::Desc {
                    rows.reverse();
                }
            }
            UrlSortMode::Status => {
                rows.sort_by(|a, b| {
                    a.status
                        .label()
                        .cmp(b.status.label())
                        .then(a.id.cmp(&b.id))
                });
                if direction == SortDirection::Desc {
                    rows.reverse();
                }
            }
            UrlSortMode::BrokenLinks => {
                rows.sort_by(|a, b| {
                    let (_, _, broken_a) = a.link_counts();
                    let (_, _, broken_b) = b.link_counts();
                    broken_b.cmp(&broken_a).then(a.id.cmp(&b.id))
                });
                if direction == SortDirection::Asc {
                    rows.reverse();
                }
            }
        }
        rows
    }
}

#[cfg(test)]
mod types_tests {
    use super::*;

    fn url_with(id: u64, status: UrlStatus, results: Vec<AnalysisResult>) -> TrackedUrl {
        TrackedUrl {
            id,
            address: format!("https://example.com/{id}"),
            status,
            created_at: "2026-08-01T10:00:00Z".to_string(),
            updated_at: "2026-08-01T10:05:00Z".to_string(),
            results,
        }
    }

    fn result_with(internal: usize, external: usize, broken: usize) -> AnalysisResult {
        AnalysisResult {
            id: 1,
            html_version: "HTML5".to_string(),
            title: "Example".to_string(),
            headings: HashMap::new(),
            internal_links: internal,
            external_links: external,
            broken_links: broken,
            login_form: false,
            created_at: "2026-08-01T10:04:00Z".to_string(),
            links: Vec::new(),
        }
    }

    #[test]
    fn status_decodes_only_known_values() {
        for (raw, expected) in [
            ("\"queued\"", UrlStatus::Queued),
            ("\"running\"", UrlStatus::Running),
            ("\"done\"", UrlStatus::Done),
            ("\"stopped\"", UrlStatus::Stopped),
            ("\"error\"", UrlStatus::Error),
        ] {
            let decoded: UrlStatus = serde_json::from_str(raw).unwrap();
            assert_eq!(decoded, expected);
        }
        assert!(serde_json::from_str::<UrlStatus>("\"paused\"").is_err());
        assert!(serde_json::from_str::<UrlStatus>("\"Running\"").is_err());
    }

    #[test]
    fn tracked_url_decodes_wire_shape() {
        let raw = json!({
            "id": 7,
            "address": "https://example.com",
            "status": "done",
            "createdAt": "2026-08-01T10:00:00Z",
            "updatedAt": "2026-08-01T10:05:00Z",
            "results": [{
                "id": 3,
                "html_version": "HTML5",
                "title": "Example Domain",
                "headings": {"h1": 1, "h2": 4},
                "internal_links": 5,
                "external_links": 3,
                "broken_links": 1,
                "login_form": true,
                "created_at": "2026-08-01T10:04:00Z",
                "links": [
                    {"id": 9, "url": "https://example.com/missing", "internal": true, "broken": true, "status": 404}
                ]
            }]
        });
        let url: TrackedUrl = serde_json::from_value(raw).unwrap();
        assert_eq!(url.id, 7);
        assert_eq!(url.status, UrlStatus::Done);
        let result = url.latest_result().unwrap();
        assert_eq!(result.heading_count("h1"), 1);
        assert_eq!(result.heading_count("h3"), 0);
        assert!(result.login_form);
        let broken = result.broken().collect::<Vec<_>>();
        assert_eq!(broken.len(), 1);
        assert_eq!(broken[0].status, 404);
    }

    #[test]
    fn tracked_url_without_results_decodes_and_defaults_to_zero() {
        let raw = json!({
            "id": 1,
            "address": "https://example.com",
            "status": "queued",
            "createdAt": "2026-08-01T10:00:00Z",
            "updatedAt": "2026-08-01T10:00:00Z"
        });
        let url: TrackedUrl = serde_json::from_value(raw).unwrap();
        assert!(url.latest_result().is_none());
        assert_eq!(url.link_counts(), (0, 0, 0));
    }

    #[test]
    fn link_counts_come_from_latest_result() {
        let url = url_with(
            1,
            UrlStatus::Done,
            vec![result_with(5, 3, 0), result_with(9, 9, 9)],
        );
        assert_eq!(url.link_counts(), (5, 3, 0));
    }

    #[test]
    fn polling_predicate_matches_running_presence() {
        let mut urls = vec![
            url_with(1, UrlStatus::Done, Vec::new()),
            url_with(2, UrlStatus::Queued, Vec::new()),
        ];
        assert!(!any_running(&urls));
        urls.push(url_with(3, UrlStatus::Running, Vec::new()));
        assert!(any_running(&urls));

        let mut state = RegistryState::default();
        state.apply_event(RegistryEvent::Registry(urls));
        assert!(state.polling_active());
    }

    #[test]
    fn chart_data_matches_latest_counts() {
        let result = result_with(5, 3, 0);
        assert_eq!(
            link_chart_data(&result),
            [("Internal", 5), ("External", 3)]
        );
        assert!(result.has_links());
        assert!(!result_with(0, 0, 0).has_links());
    }

    #[test]
    fn action_gating_follows_status() {
        for status in ALL_STATUSES {
            assert_eq!(status.can_start(), status != UrlStatus::Running);
            assert_eq!(status.can_stop(), status == UrlStatus::Running);
        }
    }

    #[test]
    fn registry_is_replaced_wholesale() {
        let mut state = RegistryState::default();
        state.apply_event(RegistryEvent::Registry(vec![
            url_with(1, UrlStatus::Queued, Vec::new()),
            url_with(2, UrlStatus::Queued, Vec::new()),
        ]));
        state.apply_event(RegistryEvent::Registry(vec![url_with(
            2,
            UrlStatus::Running,
            Vec::new(),
        )]));
        assert_eq!(state.urls.len(), 1);
        assert_eq!(state.urls[0].id, 2);
        assert!(state.loaded);
    }

    #[test]
    fn error_log_is_capped() {
        let mut state = RegistryState::default();
        for i in 0..25 {
            state.push_error(format!("err {i}"));
        }
        assert_eq!(state.errors.len(), 10);
        assert_eq!(state.errors.front().unwrap(), "err 24");
    }

    #[test]
    fn sorting_by_broken_links_puts_worst_first() {
        let mut state = RegistryState::default();
        state.apply_event(RegistryEvent::Registry(vec![
            url_with(1, UrlStatus::Done, vec![result_with(1, 1, 2)]),
            url_with(2, UrlStatus::Done, vec![result_with(1, 1, 7)]),
            url_with(3, UrlStatus::Queued, Vec::new()),
        ]));
        let rows = state.sorted_urls(UrlSortMode::BrokenLinks, SortDirection::Desc);
        assert_eq!(
            rows.iter().map(|u| u.id).collect::<Vec<_>>(),
            vec![2, 1, 3]
        );
    }

    #[test]
    fn address_validation_requires_absolute_http_url() {
        assert_eq!(
            validate_address(" https://example.com ").unwrap(),
            "https://example.com"
        );
        assert!(validate_address("").is_err());
        assert!(validate_address("example.com").is_err());
        assert!(validate_address("ftp://example.com").is_err());
    }
}
