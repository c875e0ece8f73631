use analytics_etl::domain::ports::ObjectStore;
use analytics_etl::{
    CatalogSource, EtlEngine, JobSettings, LocalObjectStore, ReportFormat, ReportPipeline,
};
use tempfile::TempDir;

const TRANSACTIONS: &str = "\
user_id,transaction_type,amount,timestamp
u1,TRANSFER,100,2024-03-01T10:00:00Z
u1,DEPOSIT,50,2024-03-01T15:00:00Z
u2,TRANSFER,75,2024-03-02T10:00:00Z
u3,WITHDRAWAL,,2024-03-02T11:00:00Z
";

fn settings(format: ReportFormat) -> JobSettings {
    JobSettings {
        job_name: "transaction-analytics".to_string(),
        folder: "analytics-output".to_string(),
        database: "wmndb".to_string(),
        table: "transaction".to_string(),
        format,
    }
}

async fn seeded_store(parts: &[(&str, &str)]) -> (TempDir, LocalObjectStore) {
    let dir = TempDir::new().unwrap();
    let store = LocalObjectStore::new(dir.path().to_str().unwrap().to_string());
    for (key, content) in parts {
        store.put(key, content.as_bytes()).await.unwrap();
    }
    (dir, store)
}

#[tokio::test]
async fn test_end_to_end_csv_export() {
    let (_dir, store) =
        seeded_store(&[("wmndb/transaction/part-00000.csv", TRANSACTIONS)]).await;

    let source = CatalogSource::new(store.clone());
    let pipeline = ReportPipeline::new(source, store.clone(), settings(ReportFormat::Csv));
    let uri = EtlEngine::new(pipeline).run().await.unwrap();
    assert!(uri.contains("Analytical_Report_"));

    // exactly one published object, and no temporary residue
    let outputs = store.list("analytics-output/").await.unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].starts_with("analytics-output/Analytical_Report_"));
    assert!(outputs[0].ends_with(".csv"));

    let content = String::from_utf8(store.get(&outputs[0]).await.unwrap()).unwrap();
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(
        lines[0],
        "User ID,Max Amount,Min Amount,Average Amount,Total Amount,Transaction Count"
    );
    // descending by total; u3's null amount counts as a zero-value transaction
    assert_eq!(lines[1], "u1,100,50,75,150,2");
    assert_eq!(lines[2], "u2,75,75,75,75,1");
    assert_eq!(lines[3], "u3,0,0,0,0,1");
    assert_eq!(lines.len(), 4);
}

#[tokio::test]
async fn test_end_to_end_xlsx_export() {
    let (_dir, store) =
        seeded_store(&[("wmndb/transaction/part-00000.csv", TRANSACTIONS)]).await;

    let source = CatalogSource::new(store.clone());
    let pipeline = ReportPipeline::new(source, store.clone(), settings(ReportFormat::Xlsx));
    let uri = EtlEngine::new(pipeline).run().await.unwrap();
    assert!(uri.contains("Combined_Analytics_"));

    let outputs = store.list("analytics-output/").await.unwrap();
    assert_eq!(outputs.len(), 1);
    assert!(outputs[0].ends_with(".xlsx"));

    let bytes = store.get(&outputs[0]).await.unwrap();
    assert_eq!(&bytes[..2], b"PK");
}

#[tokio::test]
async fn test_catalog_table_split_across_parts() {
    let (_dir, store) = seeded_store(&[
        (
            "wmndb/transaction/part-00000.csv",
            "user_id,transaction_type,amount,timestamp\nu1,TRANSFER,10,2024-03-01T10:00:00Z\n",
        ),
        (
            "wmndb/transaction/part-00001.csv",
            "user_id,transaction_type,amount,timestamp\nu2,TRANSFER,20,2024-03-01T11:00:00Z\n",
        ),
    ])
    .await;

    let source = CatalogSource::new(store.clone());
    let pipeline = ReportPipeline::new(source, store.clone(), settings(ReportFormat::Csv));
    EtlEngine::new(pipeline).run().await.unwrap();

    let outputs = store.list("analytics-output/").await.unwrap();
    let content = String::from_utf8(store.get(&outputs[0]).await.unwrap()).unwrap();
    assert_eq!(content.lines().count(), 3); // header + one row per user
}

#[tokio::test]
async fn test_empty_catalog_fails_without_publishing() {
    let (_dir, store) = seeded_store(&[]).await;

    let source = CatalogSource::new(store.clone());
    let pipeline = ReportPipeline::new(source, store.clone(), settings(ReportFormat::Csv));
    let result = EtlEngine::new(pipeline).run().await;

    assert!(result.is_err());
    assert!(store.list("analytics-output/").await.unwrap().is_empty());
}
