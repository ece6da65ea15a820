//! Non-interactive subcommands. Each one sends a single engine command and
//! prints the outcome to stdout.

use std::io::{self, Write};
use std::sync::mpsc;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result};
use jam_engine::{ApiSettings, CopyCompaniesInput, EngineEvent, EngineHandle, PageRequest};
use jam_logging::jam_info;

pub fn list_collections(settings: &ApiSettings) -> Result<()> {
    let (engine, events) = start(settings)?;
    engine.list_collections();
    let collections = match wait(&events, settings)? {
        EngineEvent::CollectionsLoaded(result) => {
            result.map_err(|err| anyhow!(err.user_message()))?
        }
        other => bail!("unexpected engine event: {other:?}"),
    };

    let mut out = io::stdout().lock();
    for collection in &collections {
        writeln!(out, "{}\t{}", collection.id, collection.collection_name)?;
    }
    Ok(())
}

pub fn list_companies(settings: &ApiSettings, offset: u64, limit: u64) -> Result<()> {
    let (engine, events) = start(settings)?;
    engine.list_companies(PageRequest::new(offset, limit));
    let batch = match wait(&events, settings)? {
        EngineEvent::CompaniesLoaded { result, .. } => {
            result.map_err(|err| anyhow!(err.user_message()))?
        }
        other => bail!("unexpected engine event: {other:?}"),
    };

    let mut out = io::stdout().lock();
    for company in &batch.companies {
        let liked = if company.liked { "liked" } else { "-" };
        writeln!(out, "{}\t{}\t{}", company.id, liked, company.company_name)?;
    }
    Ok(())
}

pub fn copy(settings: &ApiSettings, source: String, target: String, ids: Vec<i64>) -> Result<()> {
    let input = CopyCompaniesInput {
        source_collection_id: source,
        target_collection_id: target,
        selected_company_ids: ids.iter().map(ToString::to_string).collect(),
    };
    input.validate().map_err(|err| anyhow!(err.user_message()))?;
    jam_info!(
        "Copying {} companies from {} to {}",
        input.selected_company_ids.len(),
        input.source_collection_id,
        input.target_collection_id
    );

    let (engine, events) = start(settings)?;
    engine.copy_companies(input);
    let receipt = match wait(&events, settings)? {
        EngineEvent::CopyFinished { result, .. } => {
            result.map_err(|err| anyhow!(err.user_message()))?
        }
        other => bail!("unexpected engine event: {other:?}"),
    };

    let mut out = io::stdout().lock();
    match receipt {
        Some(receipt) => writeln!(out, "{} (job {})", receipt.message, receipt.job_id)?,
        None => writeln!(out, "Copy job dispatched")?,
    }
    Ok(())
}

fn start(settings: &ApiSettings) -> Result<(EngineHandle, mpsc::Receiver<EngineEvent>)> {
    EngineHandle::spawn(settings).context("failed to start the request engine")
}

fn wait(events: &mpsc::Receiver<EngineEvent>, settings: &ApiSettings) -> Result<EngineEvent> {
    let limit = settings.connect_timeout + settings.request_timeout + Duration::from_secs(1);
    events
        .recv_timeout(limit)
        .context("no response from the request engine")
}
