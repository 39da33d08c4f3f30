//! Roster processing
//!
//! Loads the roster, issues a pass for every member that does not have one
//! yet, and writes the whole workbook back once at the end. Members are
//! handled strictly one at a time; a member's failure never stops the run.

use anyhow::{Context, Result};

use crate::config::Config;
use crate::pass::{ImageSource, PassResult, PassService, build_pass_request, upload_from_url};
use crate::roster::{MemberRecord, Roster, RosterStore, columns, normalize};

/// Per-run tallies
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Passes issued during this run
    pub created: usize,
    /// Members skipped because a pass link was already recorded
    pub already_issued: usize,
    /// Members skipped because their expiration date could not be read
    pub invalid_date: usize,
    /// Members whose pass creation failed
    pub failed: usize,
}

impl RunSummary {
    pub fn total(&self) -> usize {
        self.created + self.already_issued + self.invalid_date + self.failed
    }
}

/// What happened to a single member
#[derive(Debug)]
pub enum MemberOutcome {
    Created(PassResult),
    InvalidDate,
    Failed(anyhow::Error),
}

pub struct RosterProcessor<'a> {
    config: &'a Config,
    service: &'a dyn PassService,
    images: &'a dyn ImageSource,
}

impl<'a> RosterProcessor<'a> {
    pub fn new(
        config: &'a Config,
        service: &'a dyn PassService,
        images: &'a dyn ImageSource,
    ) -> Self {
        Self {
            config,
            service,
            images,
        }
    }

    /// Load, process and persist the roster held by `store`.
    ///
    /// Only load and save failures are returned as errors.
    pub async fn run(&self, store: &dyn RosterStore) -> Result<RunSummary> {
        let mut workbook = store.load().context("Failed to load roster")?;

        let summary = self.process_roster(&mut workbook.roster).await?;

        store.save(&workbook).context("Failed to save roster")?;
        log::info!("Pass URLs saved to '{}'", workbook.roster.sheet_name);

        Ok(summary)
    }

    /// Issue passes for every member lacking one, recording links in place
    pub async fn process_roster(&self, roster: &mut Roster) -> Result<RunSummary> {
        if roster.ensure_pass_url_column() {
            log::info!("Added empty {} column", columns::PASS_URL);
        }
        if roster.is_empty() {
            log::warn!("Roster '{}' has no members", roster.sheet_name);
        }

        let mut summary = RunSummary::default();
        let total = roster.len();

        for member in roster.members() {
            if member.has_pass() {
                log::debug!("Skipping {}: pass already issued", member.name);
                summary.already_issued += 1;
                continue;
            }

            log::info!(
                "Processing member {}/{}: {}, Expiration_Date: {}",
                member.row + 1,
                total,
                member.name,
                member.expiration_date
            );

            match self.process_member(&member).await {
                MemberOutcome::Created(pass) => {
                    log::info!(
                        "Created pass {} for {}: {}",
                        pass.pass_id,
                        member.name,
                        pass.viewer_url
                    );
                    roster.set_pass_url(member.row, &pass.viewer_url)?;
                    summary.created += 1;
                }
                MemberOutcome::InvalidDate => {
                    log::error!(
                        "Invalid expiration date for {}: {}",
                        member.name,
                        member.expiration_date
                    );
                    summary.invalid_date += 1;
                }
                MemberOutcome::Failed(e) => {
                    log::error!("Failed to create pass for {}: {:#}", member.name, e);
                    summary.failed += 1;
                }
            }
        }

        Ok(summary)
    }

    /// Run the pass pipeline for one member
    pub async fn process_member(&self, member: &MemberRecord) -> MemberOutcome {
        let Some(expiration) = normalize(&member.expiration) else {
            return MemberOutcome::InvalidDate;
        };

        let image_hex = match &member.photo {
            Some(url) => {
                let hex = upload_from_url(self.images, self.service, url).await;
                if hex.is_none() {
                    log::error!("Failed to upload image for {}", member.name);
                }
                hex
            }
            None => None,
        };

        let request = build_pass_request(member, &expiration, image_hex);

        match self.service.create_pass(&request).await {
            Ok(pass_id) => MemberOutcome::Created(PassResult {
                viewer_url: self.config.viewer_link(&pass_id),
                pass_id,
            }),
            Err(e) => MemberOutcome::Failed(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pass::builder::field_keys;
    use crate::pass::models::{PassField, PassImage};
    use crate::pass::testing::{FakeImages, FakePassService};
    use crate::roster::{CellValue, RosterWorkbook};
    use std::sync::Mutex;

    /// Keeps the workbook in memory and counts saves
    struct MemoryStore {
        workbook: Mutex<RosterWorkbook>,
        saves: Mutex<usize>,
    }

    impl MemoryStore {
        fn new(roster: Roster) -> Self {
            Self {
                workbook: Mutex::new(roster.into()),
                saves: Mutex::new(0),
            }
        }

        fn roster(&self) -> Roster {
            self.workbook.lock().unwrap().roster.clone()
        }

        fn saves(&self) -> usize {
            *self.saves.lock().unwrap()
        }
    }

    impl RosterStore for MemoryStore {
        fn load(&self) -> Result<RosterWorkbook> {
            Ok(self.workbook.lock().unwrap().clone())
        }

        fn save(&self, workbook: &RosterWorkbook) -> Result<()> {
            *self.workbook.lock().unwrap() = workbook.clone();
            *self.saves.lock().unwrap() += 1;
            Ok(())
        }
    }

    struct FailingStore;

    impl RosterStore for FailingStore {
        fn load(&self) -> Result<RosterWorkbook> {
            anyhow::bail!("Failed to open Excel file: members.xlsx")
        }

        fn save(&self, _workbook: &RosterWorkbook) -> Result<()> {
            unreachable!("nothing to save when loading failed")
        }
    }

    const HEADER: [&str; 5] = ["Name", "License_Number", "ID_Number", "Expiration_Date", "Photo"];

    fn row(name: &str, expiration: CellValue, photo: &str) -> Vec<CellValue> {
        vec![
            name.into(),
            100_i64.into(),
            7_i64.into(),
            expiration,
            photo.into(),
        ]
    }

    fn roster(rows: Vec<Vec<CellValue>>) -> Roster {
        Roster::new("Members", HEADER.iter().map(|h| h.to_string()).collect(), rows)
    }

    fn with_pass_urls(rows: Vec<(Vec<CellValue>, &str)>) -> Roster {
        let mut header: Vec<String> = HEADER.iter().map(|h| h.to_string()).collect();
        header.push(columns::PASS_URL.to_string());
        let rows = rows
            .into_iter()
            .map(|(mut cells, url)| {
                cells.push(url.into());
                cells
            })
            .collect();
        Roster::new("Members", header, rows)
    }

    fn pass_url(roster: &Roster, row: usize) -> Option<String> {
        roster.member(row).and_then(|m| m.pass_url)
    }

    #[tokio::test]
    async fn test_single_member_without_photo() {
        let config = Config::default();
        let service = FakePassService::default().with_pass_id("Alice", "abc");
        let images = FakeImages::default();
        let store = MemoryStore::new(roster(vec![row("Alice", "31/12/2025".into(), "")]));

        let summary = RosterProcessor::new(&config, &service, &images)
            .run(&store)
            .await
            .unwrap();

        assert_eq!(summary.created, 1);
        assert!(images.fetched().is_empty());
        assert!(service.uploads().is_empty());

        let requests = service.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(
            requests[0].fields,
            vec![
                PassField::new(field_keys::NAME, "Alice"),
                PassField::new(field_keys::LICENSE_NUMBER, "100"),
                PassField::new(field_keys::ID_NUMBER, "7"),
                PassField::new(field_keys::EXPIRATION_DATE, "31/12/2025"),
            ]
        );
        assert!(requests[0].expiration_date.starts_with("2025-12-31T00:00:00.000"));
        assert!(requests[0].images.is_empty());

        let saved = store.roster();
        assert_eq!(store.saves(), 1);
        assert_eq!(saved.columns.last().map(String::as_str), Some(columns::PASS_URL));
        assert_eq!(pass_url(&saved, 0).as_deref(), Some("https://www.pass2u.net/d/abc"));
    }

    #[tokio::test]
    async fn test_invalid_date_makes_no_remote_calls() {
        let config = Config::default();
        let service = FakePassService::default();
        let images = FakeImages::default();
        let store = MemoryStore::new(roster(vec![row(
            "Bob",
            "not-a-date".into(),
            "https://img.example.com/bob.png",
        )]));

        let summary = RosterProcessor::new(&config, &service, &images)
            .run(&store)
            .await
            .unwrap();

        assert_eq!(summary.invalid_date, 1);
        assert_eq!(service.call_count(), 0);
        assert!(images.fetched().is_empty());
        assert_eq!(store.saves(), 1);

        let saved = store.roster();
        assert_eq!(saved.len(), 1);
        assert_eq!(pass_url(&saved, 0), None);
        assert!(saved.cell(0, columns::PASS_URL).is_empty());
    }

    #[tokio::test]
    async fn test_one_failure_among_five() {
        let config = Config::default();
        let service = FakePassService::default().failing_for("Carol");
        let images = FakeImages::default();
        let names = ["Alice", "Bob", "Carol", "Dan", "Eve"];
        let store = MemoryStore::new(roster(
            names
                .iter()
                .map(|n| row(n, "01/06/2026".into(), ""))
                .collect(),
        ));

        let summary = RosterProcessor::new(&config, &service, &images)
            .run(&store)
            .await
            .unwrap();

        assert_eq!(summary.created, 4);
        assert_eq!(summary.failed, 1);
        assert_eq!(service.requests().len(), 5);
        assert_eq!(store.saves(), 1);

        let saved = store.roster();
        for (i, name) in names.iter().enumerate() {
            let url = pass_url(&saved, i);
            if *name == "Carol" {
                assert_eq!(url, None);
            } else {
                assert_eq!(
                    url,
                    Some(format!("https://www.pass2u.net/d/pass-{}", name.to_lowercase()))
                );
            }
        }
    }

    #[tokio::test]
    async fn test_fully_issued_roster_is_untouched() {
        let config = Config::default();
        let service = FakePassService::default();
        let images = FakeImages::default();
        let original = with_pass_urls(vec![
            (row("Alice", "31/12/2025".into(), ""), "https://www.pass2u.net/d/a"),
            (
                row("Bob", 46022.0_f64.into(), "https://img.example.com/bob.png"),
                "https://www.pass2u.net/d/b",
            ),
        ]);
        let store = MemoryStore::new(original.clone());
        let processor = RosterProcessor::new(&config, &service, &images);

        for _ in 0..2 {
            let summary = processor.run(&store).await.unwrap();
            assert_eq!(summary.already_issued, 2);
            assert_eq!(summary.total(), 2);
        }

        assert_eq!(service.call_count(), 0);
        assert!(images.fetched().is_empty());
        assert_eq!(store.saves(), 2);
        assert_eq!(store.roster(), original);
    }

    #[tokio::test]
    async fn test_resume_only_processes_empty_rows() {
        let config = Config::default();
        let service = FakePassService::default();
        let images = FakeImages::default();
        let store = MemoryStore::new(with_pass_urls(vec![
            (row("Alice", "31/12/2025".into(), ""), "https://www.pass2u.net/d/a"),
            (row("Bob", "31/12/2025".into(), ""), ""),
            (row("Carol", "31/12/2025".into(), ""), "https://www.pass2u.net/d/c"),
            (row("Dan", "31/12/2025".into(), ""), ""),
        ]));

        let summary = RosterProcessor::new(&config, &service, &images)
            .run(&store)
            .await
            .unwrap();

        assert_eq!(summary.already_issued, 2);
        assert_eq!(summary.created, 2);

        let processed: Vec<String> = service
            .requests()
            .iter()
            .map(|r| r.fields[0].value.clone())
            .collect();
        assert_eq!(processed, vec!["Bob".to_string(), "Dan".to_string()]);

        let saved = store.roster();
        assert_eq!(pass_url(&saved, 0).as_deref(), Some("https://www.pass2u.net/d/a"));
        assert_eq!(pass_url(&saved, 1).as_deref(), Some("https://www.pass2u.net/d/pass-bob"));
        assert_eq!(pass_url(&saved, 2).as_deref(), Some("https://www.pass2u.net/d/c"));
        assert_eq!(pass_url(&saved, 3).as_deref(), Some("https://www.pass2u.net/d/pass-dan"));
        assert_eq!(saved.columns.len(), 6);
    }

    #[tokio::test]
    async fn test_photo_is_uploaded_as_thumbnail() {
        let config = Config::default();
        let service = FakePassService::default();
        let images = FakeImages::default();
        let store = MemoryStore::new(roster(vec![row(
            "Alice",
            "31/12/2025".into(),
            "https://img.example.com/alice.png",
        )]));

        RosterProcessor::new(&config, &service, &images)
            .run(&store)
            .await
            .unwrap();

        assert_eq!(images.fetched(), vec!["https://img.example.com/alice.png".to_string()]);
        assert_eq!(service.uploads().len(), 1);
        assert_eq!(
            service.requests()[0].images,
            vec![PassImage {
                kind: "thumbnail".to_string(),
                hex: "hex-1".to_string(),
            }]
        );
    }

    #[tokio::test]
    async fn test_image_failure_still_issues_pass() {
        let config = Config::default();
        let service = FakePassService::default();
        let images = FakeImages::failing();
        let store = MemoryStore::new(roster(vec![row(
            "Alice",
            "31/12/2025".into(),
            "https://img.example.com/missing.png",
        )]));

        let summary = RosterProcessor::new(&config, &service, &images)
            .run(&store)
            .await
            .unwrap();

        assert_eq!(summary.created, 1);
        assert!(service.uploads().is_empty());
        assert!(service.requests()[0].images.is_empty());
        assert_eq!(
            pass_url(&store.roster(), 0).as_deref(),
            Some("https://www.pass2u.net/d/pass-alice")
        );
    }

    #[tokio::test]
    async fn test_serial_expiration_keeps_raw_value_visible() {
        let config = Config::default();
        let service = FakePassService::default();
        let images = FakeImages::default();
        let store = MemoryStore::new(roster(vec![row("Alice", 46022.0_f64.into(), "")]));

        RosterProcessor::new(&config, &service, &images)
            .run(&store)
            .await
            .unwrap();

        let request = &service.requests()[0];
        assert!(request.expiration_date.starts_with("2026-01-01T00:00:00.000"));
        assert_eq!(request.fields[3], PassField::new(field_keys::EXPIRATION_DATE, "46022"));
    }

    #[tokio::test]
    async fn test_custom_viewer_url() {
        let config = Config {
            viewer_url: "https://passes.example.com/d".to_string(),
            ..Config::default()
        };
        let service = FakePassService::default().with_pass_id("Alice", "xyz");
        let images = FakeImages::default();
        let mut members = roster(vec![row("Alice", "31/12/2025".into(), "")]);

        let summary = RosterProcessor::new(&config, &service, &images)
            .process_roster(&mut members)
            .await
            .unwrap();

        assert_eq!(summary.created, 1);
        assert_eq!(pass_url(&members, 0).as_deref(), Some("https://passes.example.com/d/xyz"));
    }

    #[tokio::test]
    async fn test_load_failure_is_fatal() {
        let config = Config::default();
        let service = FakePassService::default();
        let images = FakeImages::default();

        let result = RosterProcessor::new(&config, &service, &images)
            .run(&FailingStore)
            .await;

        assert!(result.is_err());
        assert_eq!(service.call_count(), 0);
    }
}
