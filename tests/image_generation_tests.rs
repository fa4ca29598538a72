use std::sync::Arc;

use aoai_labs::{ImageGenerationUseCase, ImageResponse, MockImageClient, ScriptedConsole, Settings};

fn settings() -> Settings {
    Settings::from_json(
        "appsettings.json",
        r#"{"AzureOAIEndpoint": "https://example.openai.azure.com/", "AzureOAIKey": "test-key"}"#,
    )
    .expect("settings")
}

#[tokio::test]
async fn image_url_ampersands_are_unescaped() {
    let client = Arc::new(MockImageClient::returning(ImageResponse::new(
        Some("A shiny red bicycle leaning on a wall".to_string()),
        Some("https://dalle.example/img.png?sv=2024\\u0026foo=bar".to_string()),
    )));
    let use_case = ImageGenerationUseCase::new(client.clone(), settings());
    let mut console = ScriptedConsole::new(["a red bicycle"]);

    let image = use_case.execute(&mut console).await.expect("image");

    assert!(image.is_some());
    assert!(console.output().contains("&foo=bar"));
    assert!(!console.output().contains("u0026"));
    assert!(console.output().contains("A shiny red bicycle leaning on a wall"));

    let (deployment, request) = &client.requests()[0];
    assert_eq!(deployment, "dalle3");
    assert_eq!(request.prompt, "a red bicycle");
    assert_eq!(request.n, 1);
    assert_eq!(request.size, "1024x1024");
}

#[tokio::test]
async fn image_failure_is_printed_not_propagated() {
    let client = Arc::new(MockImageClient::failing("content filtered"));
    let use_case = ImageGenerationUseCase::new(client, settings()).with_deployment("dalle3-eu");
    let mut console = ScriptedConsole::new(["a red bicycle"]);

    let image = use_case.execute(&mut console).await.expect("image");

    assert!(image.is_none());
    assert!(console.output().contains("content filtered"));
}

#[tokio::test]
async fn image_requires_endpoint_and_key() {
    let client = Arc::new(MockImageClient::returning(ImageResponse::default()));
    let settings = Settings::from_json("appsettings.json", r#"{"AzureOAIKey": "k"}"#).unwrap();
    let use_case = ImageGenerationUseCase::new(client.clone(), settings);
    let mut console = ScriptedConsole::new(["a red bicycle"]);

    use_case.execute(&mut console).await.expect("image");

    assert_eq!(client.call_count(), 0);
    assert!(console
        .output()
        .contains("Please check your appsettings.json file for missing or incorrect values."));
}

#[tokio::test]
async fn blank_image_prompt_is_not_sent() {
    let client = Arc::new(MockImageClient::returning(ImageResponse::default()));
    let use_case = ImageGenerationUseCase::new(client.clone(), settings());
    let mut console = ScriptedConsole::new(["   "]);

    use_case.execute(&mut console).await.expect("image");

    assert_eq!(client.call_count(), 0);
    assert!(console.output().contains("Please enter a prompt."));
}
