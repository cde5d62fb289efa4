use crate::data::notification::NotificationRepository;

use super::*;

/// Expect the token to be posted to the new-orders topic
#[tokio::test]
async fn subscribes_token() -> Result<(), TestError> {
    let test = TestBuilder::new().with_subscribe_endpoint(1).build().await?;

    let client = test_client(&test);
    let result = NotificationRepository::new(&client)
        .subscribe("device-token")
        .await;

    assert!(result.is_ok());
    test.assert_mocks();

    Ok(())
}
