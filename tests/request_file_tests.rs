use menu_suggest::cli::read_raw_request;
use menu_suggest::MenuRequest;
use std::io::Write;
use tempfile::NamedTempFile;

#[tokio::test]
async fn test_reads_request_file() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        r#"{{"ingredients": ["lentils", "carrots"], "servings": 0, "cuisineType": "indian"}}"#
    )
    .unwrap();

    let raw = read_raw_request(file.path().to_str().unwrap()).await.unwrap();
    let (request, report) = MenuRequest::from_value(&raw).validate();
    assert_eq!(request.ingredients, vec!["lentils", "carrots"]);
    assert_eq!(request.servings, 1);
    assert_eq!(report.errors, vec!["Servings must be at least 1"]);
}

#[tokio::test]
async fn test_missing_file_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.json");
    let err = read_raw_request(path.to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("Failed to read request file"));
}

#[tokio::test]
async fn test_malformed_json_is_an_error() {
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{{ not json").unwrap();
    let err = read_raw_request(file.path().to_str().unwrap()).await.unwrap_err();
    assert!(err.to_string().contains("is not valid JSON"));
}
