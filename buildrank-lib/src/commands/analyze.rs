use super::Host;
use super::common::{ColorMode, LogLevel, csv_file_name, init_logging};
use super::config::Config;
use crate::Result;
use crate::corpus::{ConfigDocument, count_subdirectories, discover};
use crate::coverage::{CoverageRow, step_coverage};
use crate::inventory::{Inventory, flatten};
use crate::metrics::{ConfigurationMetrics, EntityMetrics, extract_configuration, extract_project};
use crate::reports::{
    ReportBook, ReportKind, complexity_table, coverage_table, generate_console, generate_csv, generate_json, generate_xlsx,
    inventory_table, merge_into_existing_json, merge_into_existing_xlsx,
};
use crate::scoring::{ScoredEntity, score};
use camino::{Utf8Path, Utf8PathBuf};
use chrono::Local;
use clap::Parser;
use ohno::IntoAppError;
use std::fs;
use std::io::Write;

const LOG_TARGET: &str = "   analyze";

#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Directory whose subdirectories are the entities to analyze
    #[arg(value_name = "ROOT", default_value = ".teamcity")]
    pub root: Utf8PathBuf,

    /// Path to configuration file (default is `buildrank.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none")]
    pub log_level: LogLevel,

    /// Control when to use colored output
    #[arg(long, value_name = "WHEN", default_value = "auto")]
    pub color: ColorMode,

    /// Tables to produce
    #[arg(long, value_name = "TABLES", value_delimiter = ',', default_values = ["inventory", "complexity", "coverage"])]
    pub reports: Vec<ReportKind>,

    /// Write the tables to an Excel workbook, one worksheet per table
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub excel: Option<Utf8PathBuf>,

    /// Write the tables as CSV files into this directory, one file per table
    #[arg(long, value_name = "DIR", help_heading = "Report Output")]
    pub csv: Option<Utf8PathBuf>,

    /// Write the tables to a JSON file, replacing same-named tables of an existing report
    #[arg(long, value_name = "PATH", help_heading = "Report Output")]
    pub json: Option<Utf8PathBuf>,

    /// Print the ranking to the console.
    /// If omitted, the ranking is printed only when no other reports are generated.
    #[arg(long, help_heading = "Report Output")]
    pub console: bool,
}

/// A file whose contribution was dropped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedFile {
    pub path: Utf8PathBuf,
    pub reason: String,
}

/// Everything one pass over an analysis root produces.
#[derive(Debug)]
pub struct Analysis {
    pub inventory: Inventory,
    pub entities: Vec<EntityMetrics>,
    pub coverage: Vec<CoverageRow>,
    pub scored: Vec<ScoredEntity>,
    pub skipped: Vec<SkippedFile>,

    /// Files that were parsed and contributed, descriptors included
    pub files_analyzed: usize,
}

impl Analysis {
    /// Render the requested tables, named after their kind.
    ///
    /// # Errors
    ///
    /// Returns an error only if the table invariants are broken, which indicates a bug.
    pub fn book(&self, kinds: &[ReportKind]) -> Result<ReportBook> {
        let mut book = ReportBook::new();

        for kind in kinds {
            let table = match kind {
                ReportKind::Inventory => inventory_table(&self.inventory)?,
                ReportKind::Complexity => complexity_table(&self.scored, &self.entities)?,
                ReportKind::Coverage => coverage_table(&self.coverage)?,
            };

            let _ = book.insert(kind.to_string(), table);
        }

        Ok(book)
    }
}

/// Walk `root`, flatten and measure every configuration, then score all entities.
///
/// Malformed files are recorded in [`Analysis::skipped`] and do not fail the run.
///
/// # Errors
///
/// Returns an error if the configured weights are invalid.
pub fn analyze(root: &Utf8Path, config: &Config) -> Result<Analysis> {
    let weights = config.weights()?;

    let mut inventory = Inventory::new();
    let mut entities = Vec::new();
    let mut coverage = Vec::new();
    let mut skipped = Vec::new();
    let mut files_analyzed = 0;

    for folder in discover(root, &config.layout) {
        let mut metrics = EntityMetrics::new(folder.name.as_str());

        for path in &folder.config_files {
            let Some(doc) = read_document(path, &mut skipped) else {
                continue;
            };

            files_analyzed += 1;
            let pipeline = path.file_stem().unwrap_or(path.as_str()).to_string();

            log::debug!(target: LOG_TARGET, "Analyzing '{path}' ({} dialect)", doc.dialect());

            inventory.merge(&folder.name, flatten(&doc));
            coverage.extend(step_coverage(
                &folder.name,
                &pipeline,
                &doc,
                &config.detection,
                &config.completion_weights,
            ));

            metrics.configurations.push(ConfigurationMetrics {
                metrics: extract_configuration(&doc, &config.detection),
                dialect: doc.dialect(),
                path: path.clone(),
                pipeline,
            });
        }

        if let Some(path) = &folder.project_descriptor
            && let Some(doc) = read_document(path, &mut skipped)
        {
            files_analyzed += 1;
            inventory.merge(&folder.name, flatten(&doc));
            metrics.project = Some(extract_project(&doc, &config.detection));
        }

        if let Some(dir) = &folder.plugin_data_dir {
            metrics.plugin_data_subfolders = count_subdirectories(dir);
        }

        entities.push(metrics);
    }

    let scored = score(
        entities.iter().map(|e| (e.entity.clone(), e.total())),
        &weights,
        config.scoring.epsilon,
    );

    Ok(Analysis {
        inventory,
        entities,
        coverage,
        scored,
        skipped,
        files_analyzed,
    })
}

fn read_document(path: &Utf8Path, skipped: &mut Vec<SkippedFile>) -> Option<ConfigDocument> {
    match ConfigDocument::read(path) {
        Ok(doc) => Some(doc),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Skipping '{path}': {e}");
            skipped.push(SkippedFile {
                path: path.to_path_buf(),
                reason: e.to_string(),
            });
            None
        }
    }
}

pub fn analyze_root<H: Host>(host: &mut H, args: &AnalyzeArgs) -> Result<()> {
    init_logging(args.log_level);

    let config = Config::load(Utf8Path::new("."), args.config.as_ref())?;
    let analysis = analyze(&args.root, &config)?;
    let book = analysis.book(&args.reports)?;

    let mut written = Vec::new();

    if let Some(path) = &args.excel {
        let book = if path.exists() {
            merge_into_existing_xlsx(path, &book)?
        } else {
            book.clone()
        };

        let mut file = fs::File::create(path).into_app_err_with(|| format!("creating Excel report '{path}'"))?;
        generate_xlsx(&book, &mut file).into_app_err_with(|| format!("writing Excel report '{path}'"))?;
        written.push(path.clone());
    }

    if let Some(dir) = &args.csv {
        fs::create_dir_all(dir).into_app_err_with(|| format!("creating CSV directory '{dir}'"))?;
        for (name, table) in book.iter() {
            let path = dir.join(csv_file_name(name));
            let file = fs::File::create(&path).into_app_err_with(|| format!("creating CSV report '{path}'"))?;
            generate_csv(table, file).into_app_err_with(|| format!("writing CSV report '{path}'"))?;
            written.push(path);
        }
    }

    if let Some(path) = &args.json {
        let book = if path.exists() {
            let existing = fs::read_to_string(path).into_app_err_with(|| format!("reading existing JSON report '{path}'"))?;
            merge_into_existing_json(&existing, &book)?
        } else {
            book.clone()
        };

        let mut json_output = String::new();
        generate_json(&book, Local::now(), &mut json_output)?;
        fs::write(path, json_output).into_app_err_with(|| format!("writing JSON report '{path}'"))?;
        written.push(path.clone());
    }

    if args.console || written.is_empty() {
        let mut console_output = String::new();
        generate_console(&analysis.scored, args.color.use_colors(), &mut console_output)?;
        let _ = write!(host.output(), "{console_output}");
    }

    if !analysis.skipped.is_empty() {
        let _ = writeln!(host.error(), "Skipped {} file(s)", analysis.skipped.len());
        for file in &analysis.skipped {
            let _ = writeln!(host.error(), "  {}: {}", file.path, file.reason);
        }
    }

    let _ = writeln!(
        host.output(),
        "Analyzed {} entities, {} configuration files, {} skipped",
        analysis.entities.len(),
        analysis.files_analyzed,
        analysis.skipped.len()
    );

    for path in &written {
        let _ = writeln!(host.output(), "Wrote {path}");
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::Metric;
    use crate::reports::Cell;

    fn write(root: &Utf8Path, relative: &str, contents: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn corpus() -> (tempfile::TempDir, Utf8PathBuf) {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().to_path_buf()).unwrap();

        write(
            &root,
            "Payments/buildTypes/Build.xml",
            r#"<build-type uuid="p1">
                <settings>
                    <build-runners>
                        <runner id="R1" name="Compile" type="simpleRunner">
                            <parameters><param name="script" value="make"/></parameters>
                        </runner>
                    </build-runners>
                </settings>
            </build-type>"#,
        );
        write(&root, "Payments/buildTypes/Broken.xml", "<build-type><settings></build-type>");
        write(
            &root,
            "Payments/project-config.xml",
            r#"<project><parameters><param name="env" value="prod"/></parameters></project>"#,
        );
        fs::create_dir_all(root.join("Payments/pluginData/one")).unwrap();
        fs::create_dir_all(root.join("Empty")).unwrap();

        (tmp, root)
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_analyze_skips_malformed_files() {
        let (_tmp, root) = corpus();
        let analysis = analyze(&root, &Config::default()).unwrap();

        assert_eq!(analysis.files_analyzed, 2);
        assert_eq!(analysis.skipped.len(), 1);
        assert!(analysis.skipped[0].path.ends_with("Broken.xml"));
        assert!(!analysis.skipped[0].reason.is_empty());
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_analyze_measures_every_entity() {
        let (_tmp, root) = corpus();
        let analysis = analyze(&root, &Config::default()).unwrap();

        let names: Vec<_> = analysis.entities.iter().map(|e| e.entity.as_str()).collect();
        assert_eq!(names, ["Empty", "Payments"]);

        let payments = analysis.entities[1].total();
        assert_eq!(payments.get(Metric::BuildSteps), 1);
        assert_eq!(payments.get(Metric::BuildStepParams), 1);
        assert_eq!(payments.get(Metric::ProjectParameters), 1);
        assert_eq!(payments.get(Metric::PluginDataSubfolders), 1);

        assert_eq!(analysis.scored[0].entity(), "Payments");
        assert_eq!(analysis.scored[1].entity(), "Empty");
        assert!(analysis.inventory.get("Empty").is_none());
        assert_eq!(analysis.coverage.len(), 1);
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_book_contains_requested_tables_only() {
        let (_tmp, root) = corpus();
        let analysis = analyze(&root, &Config::default()).unwrap();

        let book = analysis.book(&[ReportKind::Complexity]).unwrap();
        assert_eq!(book.len(), 1);

        let complexity = book.get("Complexity").unwrap();
        assert_eq!(complexity.rows().len(), 2);
        assert_eq!(complexity.rows()[0][1], Cell::from("Build"));
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_invalid_weights_fail_the_analysis() {
        let (_tmp, root) = corpus();
        let mut config = Config::default();
        config.scoring.weights.clear();

        let _ = analyze(&root, &config).unwrap_err();
    }

    #[test]
    #[cfg_attr(miri, ignore = "Miri cannot call GetTempPathW")]
    fn test_missing_root_yields_empty_analysis() {
        let tmp = tempfile::tempdir().unwrap();
        let root = Utf8PathBuf::try_from(tmp.path().join("absent")).unwrap();

        let analysis = analyze(&root, &Config::default()).unwrap();
        assert!(analysis.entities.is_empty());
        assert!(analysis.scored.is_empty());
    }
}
