const CSV_HEADERS: [&str; 12] = [
    "id",
    "address",
    "status",
    "created_at",
    "updated_at",
    "result_count",
    "html_version",
    "title",
    "internal_links",
    "external_links",
    "broken_links",
    "login_form",
];

/// One registry row flattened for export: identity plus the latest
/// analysis result, zeros and empty strings when none exists yet.
#[derive(Debug, Clone, Serialize)]
struct ExportRecord {
    id: u64,
    address: String,
    status: &'static str,
    created_at: String,
    updated_at: String,
    result_count: usize,
    html_version: String,
    title: String,
    internal_links: usize,
    external_links: usize,
    broken_links: usize,
    login_form: bool,
}

fn url_to_export_record(url: &TrackedUrl) -> ExportRecord {
    let latest = url.latest_result();
    let (internal, external, broken) = url.link_counts();
    ExportRecord {
        id: url.id,
        address: url.address.clone(),
        status: url.status.label(),
        created_at: url.created_at.clone(),
        updated_at: url.updated_at.clone(),
        result_count: url.results.len(),
        html_version: latest.map(|r| r.html_version.clone()).unwrap_or_default(),
        title: latest.map(|r| r.title.clone()).unwrap_or_default(),
        internal_links: internal,
        external_links: external,
        broken_links: broken,
        login_form: latest.map(|r| r.login_form).unwrap_or(false),
    }
}

fn write_csv_snapshot(path: &str, urls: &[TrackedUrl]) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = csv::Writer::from_writer(file);
    writer.write_record(CSV_HEADERS)?;
    for url in urls {
        let rec = url_to_export_record(url);
        writer.write_record([
            rec.id.to_string(),
            rec.address,
            rec.status.to_string(),
            rec.created_at,
            rec.updated_at,
            rec.result_count.to_string(),
            rec.html_version,
            rec.title,
            rec.internal_links.to_string(),
            rec.external_links.to_string(),
            rec.broken_links.to_string(),
            rec.login_form.to_string(),
        ])?;
    }
    writer.flush()
}

fn write_json_snapshot(path: &str, urls: &[TrackedUrl]) -> io::Result<()> {
    let records = urls.iter().map(url_to_export_record).collect::<Vec<_>>();
    let mut file = File::create(path)?;
    serde_json::to_writer_pretty(&mut file, &records).map_err(io::Error::other)?;
    file.write_all(b"\n")?;
    file.flush()
}

fn export_snapshot(path: &str, format: DataFormat, urls: &[TrackedUrl]) -> io::Result<()> {
    match detect_data_format(path, format) {
        DataFormat::Csv => write_csv_snapshot(path, urls),
        DataFormat::Json => write_json_snapshot(path, urls),
    }
}

fn detect_data_format(path: &str, fallback: DataFormat) -> DataFormat {
    let lower = path.to_ascii_lowercase();
    if lower.ends_with(".json") {
        DataFormat::Json
    } else if lower.ends_with(".csv") {
        DataFormat::Csv
    } else {
        fallback
    }
}

fn default_export_path(format: DataFormat) -> String {
    let ts = Utc::now().format("%Y%m%d_%H%M%S");
    match format {
        DataFormat::Csv => format!("crawldeck_{ts}.csv"),
        DataFormat::Json => format!("crawldeck_{ts}.json"),
    }
}

#[cfg(test)]
mod export_tests {
    use super::*;

    #[test]
    fn record_flattens_latest_result() {
        let url = TrackedUrl {
            id: 4,
            address: "https://example.com".to_string(),
            status: UrlStatus::Done,
            created_at: "2026-08-01T10:00:00Z".to_string(),
            updated_at: "2026-08-01T10:05:00Z".to_string(),
            results: vec![AnalysisResult {
                id: 1,
                html_version: "HTML5".to_string(),
                title: "Example".to_string(),
                headings: HashMap::new(),
                internal_links: 5,
                external_links: 3,
                broken_links: 1,
                login_form: true,
                created_at: "2026-08-01T10:04:00Z".to_string(),
                links: Vec::new(),
            }],
        };
        let rec = url_to_export_record(&url);
        assert_eq!(rec.status, "done");
        assert_eq!(rec.result_count, 1);
        assert_eq!(
            (rec.internal_links, rec.external_links, rec.broken_links),
            (5, 3, 1)
        );
        assert!(rec.login_form);
    }

    #[test]
    fn record_for_unanalyzed_url_is_all_defaults() {
        let url = TrackedUrl {
            id: 9,
            address: "https://example.org".to_string(),
            status: UrlStatus::Queued,
            created_at: "2026-08-01T10:00:00Z".to_string(),
            updated_at: "2026-08-01T10:00:00Z".to_string(),
            results: Vec::new(),
        };
        let rec = url_to_export_record(&url);
        assert_eq!(rec.result_count, 0);
        assert_eq!(
            (rec.internal_links, rec.external_links, rec.broken_links),
            (0, 0, 0)
        );
        assert!(rec.html_version.is_empty());
        assert!(!rec.login_form);
    }

    #[test]
    fn format_detection_prefers_extension() {
        assert_eq!(
            detect_data_format("snapshot.json", DataFormat::Csv),
            DataFormat::Json
        );
        assert_eq!(
            detect_data_format("snapshot.CSV", DataFormat::Json),
            DataFormat::Csv
        );
        assert_eq!(
            detect_data_format("snapshot.out", DataFormat::Json),
            DataFormat::Json
        );
    }
}
