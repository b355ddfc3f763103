use std::path::{Path, PathBuf};
use std::time::Instant;

use anyhow::{Context, Result};
use tracing::{debug, info, info_span, trace};

use msku_core::{BatchProcessor, ProcessingOptions, TracingObserver};
use msku_ingest::{
    ColumnDetection, DetectionOptions, detect_identifier_column_with, read_csv_frame,
    write_csv_frame,
};
use msku_map::{
    Classifier, ClassifierRules, MappingRepository, MappingStore, parse_variant_list,
    sample_mappings,
};
use msku_model::{MappingReport, MasterMapping, ProcessingSummary};

use crate::cli::{ClassifyArgs, DetectArgs, DetectionArgs, MappingsArgs, ProcessArgs, RulesArgs};
use crate::logging::redact_value;

/// Result of `msku process`.
#[derive(Debug)]
pub struct ProcessOutcome {
    pub input: PathBuf,
    pub sku_column: String,
    pub detection: Option<ColumnDetection>,
    pub summary: ProcessingSummary,
    /// Store state after the batch.
    pub report: MappingReport,
    pub output: Option<PathBuf>,
    pub saved_mappings: Option<PathBuf>,
}

/// Result of `msku mappings`.
#[derive(Debug)]
pub struct MappingsOutcome {
    pub path: PathBuf,
    pub report: MappingReport,
    /// True when edits were written back to `path`.
    pub saved: bool,
}

pub fn run_process(args: &ProcessArgs) -> Result<ProcessOutcome> {
    let span = info_span!("process", input = %args.input.display());
    let _guard = span.enter();
    let started = Instant::now();

    let classifier = load_classifier(&args.rules)?;
    let seed = match &args.mappings {
        Some(path) => MappingRepository::new(path).load()?,
        None => MasterMapping::new(),
    };
    let mut store = MappingStore::from_mapping(seed).with_classifier(classifier);
    if args.sample_mappings {
        add_sample_mappings(&mut store)?;
    }
    info!(categories = store.len(), "mapping store ready");

    let df = read_csv_frame(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;

    let mut options = ProcessingOptions::default()
        .with_require_detected_column(args.require_column)
        .with_detection(detection_options(&args.detection));
    if let Some(column) = &args.column {
        options = options.with_identifier_column(column.clone());
    }
    let mut batch = BatchProcessor::new(options)
        .process_with_observer(&df, &mut store, &mut TracingObserver)
        .with_context(|| format!("process {}", args.input.display()))?;

    for record in &batch.records {
        trace!(
            row = record.row,
            identifier = redact_value(record.identifier.as_deref().unwrap_or_default()),
            msku = %record.msku,
            method = %record.method,
            "row mapped"
        );
    }

    if let Some(path) = &args.output {
        write_csv_frame(&mut batch.data, path)
            .with_context(|| format!("write {}", path.display()))?;
        info!(path = %path.display(), rows = batch.data.height(), "annotated data written");
    }
    if let Some(path) = &args.save_mappings {
        MappingRepository::new(path).save(store.mapping())?;
        info!(path = %path.display(), categories = store.len(), "mappings saved");
    }

    info!(
        elapsed_ms = started.elapsed().as_millis() as u64,
        success_rate = batch.summary.success_rate,
        "process complete"
    );
    Ok(ProcessOutcome {
        input: args.input.clone(),
        sku_column: batch.sku_column,
        detection: batch.column_detection,
        summary: batch.summary,
        report: store.summary(),
        output: args.output.clone(),
        saved_mappings: args.save_mappings.clone(),
    })
}

/// Classifies each identifier, returning `(identifier, category)` pairs.
pub fn run_classify(args: &ClassifyArgs) -> Result<Vec<(String, String)>> {
    let classifier = load_classifier(&args.rules)?;
    Ok(args
        .identifiers
        .iter()
        .map(|id| (id.clone(), classifier.classify(id)))
        .collect())
}

pub fn run_detect(args: &DetectArgs) -> Result<Option<ColumnDetection>> {
    let df = read_csv_frame(&args.input)
        .with_context(|| format!("load {}", args.input.display()))?;
    Ok(detect_identifier_column_with(
        &df,
        &detection_options(&args.detection),
    ))
}

pub fn run_mappings(args: &MappingsArgs) -> Result<MappingsOutcome> {
    let repository = MappingRepository::new(&args.path);
    let mut store = MappingStore::from_mapping(repository.load()?);
    let mut modified = false;

    if args.clear {
        store.clear();
        modified = true;
    }
    if args.sample {
        add_sample_mappings(&mut store)?;
        modified = true;
    }
    if let (Some(msku), Some(raw)) = (&args.set, &args.variants) {
        let variants = parse_variant_list(raw);
        debug!(msku = %msku, variants = variants.len(), "replacing variants");
        store
            .set_mapping(msku, variants)
            .with_context(|| format!("set mapping for {msku}"))?;
        modified = true;
    }
    if let Some(msku) = &args.remove {
        store
            .remove_mapping(msku)
            .with_context(|| format!("remove mapping {msku}"))?;
        modified = true;
    }

    if modified {
        repository.save(store.mapping())?;
    }
    Ok(MappingsOutcome {
        path: args.path.clone(),
        report: store.summary(),
        saved: modified,
    })
}

fn load_classifier(args: &RulesArgs) -> Result<Classifier> {
    match &args.rules {
        Some(path) => Ok(Classifier::new(load_rules(path)?)),
        None => Ok(Classifier::default()),
    }
}

fn load_rules(path: &Path) -> Result<ClassifierRules> {
    let rules = ClassifierRules::load(path)?;
    debug!(
        path = %path.display(),
        brands = rules.brands.len(),
        keyword_groups = rules.keyword_groups.len(),
        "loaded classifier rules"
    );
    Ok(rules)
}

/// Sample entries replace same-named mappings in the store.
fn add_sample_mappings(store: &mut MappingStore) -> Result<()> {
    for (msku, variants) in sample_mappings().iter() {
        store
            .set_mapping(msku, variants)
            .with_context(|| format!("add sample mapping {msku}"))?;
    }
    Ok(())
}

fn detection_options(args: &DetectionArgs) -> DetectionOptions {
    DetectionOptions {
        sample_size: args.sample_size,
        min_identifier_ratio: args.min_ratio,
    }
}
