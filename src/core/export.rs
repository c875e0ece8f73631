use uuid::Uuid;

use crate::domain::model::DataTable;
use crate::domain::ports::ObjectStore;
use crate::utils::error::{EtlError, Result};

const SUCCESS_MARKER: &str = "_SUCCESS";

/// Writes one view through the distributed-write emulation and rewrites the
/// result into a single object under `final_key`.
///
/// The write step produces an engine-named part object plus a success marker
/// under `temp_prefix`; the promote step normalizes that into the final key
/// and removes the temporary objects. Callers derive `temp_prefix` from the
/// generation timestamp so concurrent runs do not share it.
pub async fn export_single_csv<S: ObjectStore>(
    store: &S,
    table: &DataTable,
    temp_prefix: &str,
    final_key: &str,
) -> Result<String> {
    write_temp_csv(store, table, temp_prefix).await?;
    promote_single_part(store, temp_prefix, final_key).await
}

/// The write half: clears the temporary prefix (overwrite semantics), then
/// writes the view as one coalesced CSV part and the success marker.
pub async fn write_temp_csv<S: ObjectStore>(
    store: &S,
    table: &DataTable,
    temp_prefix: &str,
) -> Result<()> {
    for stale in store.list(temp_prefix).await? {
        tracing::debug!("removing stale temporary object: {}", stale);
        store.delete(&stale).await?;
    }

    let bytes = serialize_csv(table)?;
    let part_key = format!("{}part-00000-{}-c000.csv", temp_prefix, Uuid::new_v4());
    tracing::debug!("writing {} bytes to {}", bytes.len(), part_key);
    store.put(&part_key, &bytes).await?;
    store.put(&format!("{}{}", temp_prefix, SUCCESS_MARKER), b"").await?;
    Ok(())
}

/// The normalize half: locates the data part under the temporary prefix,
/// copies it to the final key and removes the temporary objects. Fails with
/// `ExportIncompleteError` when no part is present; in that case nothing is
/// published. The success marker delete is best-effort cleanup.
pub async fn promote_single_part<S: ObjectStore>(
    store: &S,
    temp_prefix: &str,
    final_key: &str,
) -> Result<String> {
    let keys = store.list(temp_prefix).await?;
    let part_key = keys
        .iter()
        .find(|key| key.ends_with(".csv"))
        .ok_or_else(|| EtlError::ExportIncompleteError {
            prefix: temp_prefix.to_string(),
        })?;

    tracing::debug!("promoting {} to {}", part_key, final_key);
    store.copy(part_key, final_key).await?;
    store.delete(part_key).await?;

    let marker_key = format!("{}{}", temp_prefix, SUCCESS_MARKER);
    if let Err(e) = store.delete(&marker_key).await {
        tracing::warn!("failed to remove success marker {}: {}", marker_key, e);
    }

    Ok(store.uri(final_key))
}

fn serialize_csv(table: &DataTable) -> Result<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(table.columns.iter().copied())?;
    for row in &table.rows {
        writer.write_record(row.iter().map(|cell| cell.render()))?;
    }
    writer
        .into_inner()
        .map_err(|e| EtlError::IoError(std::io::Error::other(e.to_string())))
}
