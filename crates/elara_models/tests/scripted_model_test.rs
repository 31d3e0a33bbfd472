use elara_core::GenerateRequest;
use elara_error::{ElaraError, ModelError, ModelErrorKind};
use elara_interface::TextModel;
use elara_models::ScriptedModel;
use elara_retry::RetryOrchestrator;
use std::time::Duration;

fn gateway_error() -> ElaraError {
    ModelError::new(ModelErrorKind::Http {
        status_code: 502,
        message: "Bad Gateway".to_string(),
    })
    .into()
}

#[tokio::test]
async fn replays_outcomes_in_order() {
    let model = ScriptedModel::new(vec![Err(gateway_error()), Ok("second".to_string())]);
    let request = GenerateRequest::from_prompt("essay prompt");

    assert!(model.generate(&request).await.is_err());
    assert_eq!(model.generate(&request).await.unwrap(), "second");
    assert_eq!(model.calls(), 2);
    assert_eq!(model.prompts().await, vec!["essay prompt", "essay prompt"]);
}

#[tokio::test]
async fn exhausted_script_fails_without_retry() {
    let model = ScriptedModel::replying(Vec::<String>::new());
    let retry = RetryOrchestrator::new(3, Duration::from_millis(1));
    let request = GenerateRequest::from_prompt("prompt");

    let result = retry.run("exhausted", || model.generate(&request)).await;

    assert!(result.is_err());
    assert_eq!(model.calls(), 1);
}

#[tokio::test]
async fn retry_recovers_from_gateway_errors() {
    let model = ScriptedModel::new(vec![
        Err(gateway_error()),
        Err(gateway_error()),
        Ok("{\"summary\": \"fine\"}".to_string()),
    ]);
    let retry = RetryOrchestrator::new(3, Duration::from_millis(1));
    let request = GenerateRequest::from_prompt("prompt");

    let text = retry
        .run("critique", || model.generate(&request))
        .await
        .unwrap();

    assert!(text.contains("fine"));
    assert_eq!(model.calls(), 3);
}
