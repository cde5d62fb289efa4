//! Page-side integrations reached through `document::eval`: the identity
//! provider, the Notification API, audio and the push-messaging SDK.

use async_trait::async_trait;
use dioxus::prelude::*;
use dioxus_logger::tracing;

use crate::{
    data::CredentialProvider,
    model::notification::PushMessageDto,
    notification::{NotificationHub, Permission},
};

const SESSION_POLL_MILLIS: u32 = 250;
const SESSION_POLL_ATTEMPTS: u32 = 40;

/// Asks the identity provider for a fresh token on every API request.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentitySession;

#[async_trait(?Send)]
impl CredentialProvider for IdentitySession {
    async fn bearer_token(&self) -> Option<String> {
        session_token().await
    }
}

/// Current bearer token from the identity provider's session, if signed in.
pub async fn session_token() -> Option<String> {
    let eval = document::eval(
        r#"
        const session = window.Clerk && window.Clerk.session;
        if (!session) { return null; }
        return await session.getToken();
        "#,
    );

    match eval.join::<Option<String>>().await {
        Ok(token) => token,
        Err(e) => {
            tracing::warn!("Failed to read session token: {}", e);
            None
        }
    }
}

/// Waits briefly for the identity provider to finish loading a session.
pub async fn wait_for_session() -> bool {
    for _ in 0..SESSION_POLL_ATTEMPTS {
        if session_token().await.is_some() {
            return true;
        }
        sleep(SESSION_POLL_MILLIS).await;
    }
    false
}

/// Permission already recorded by the browser, without prompting.
pub async fn notification_permission() -> Permission {
    let eval = document::eval(
        r#"return ("Notification" in window) ? Notification.permission : "denied";"#,
    );
    let value = eval.join::<String>().await.unwrap_or_default();
    Permission::parse(&value)
}

/// Prompts the operator for notification permission.
pub async fn request_notification_permission() -> Permission {
    let eval = document::eval(
        r#"
        if (!("Notification" in window)) { return "denied"; }
        return await Notification.requestPermission();
        "#,
    );

    match eval.join::<String>().await {
        Ok(value) => Permission::parse(&value),
        Err(e) => {
            tracing::warn!("Notification permission request failed: {}", e);
            Permission::Default
        }
    }
}

pub fn play_sound(url: &str) {
    let eval = document::eval(
        r#"
        const url = await dioxus.recv();
        new Audio(url).play().catch(() => {});
        "#,
    );
    if let Err(e) = eval.send(url) {
        tracing::debug!("Could not play notification sound: {}", e);
    }
}

pub fn show_desktop_notification(title: &str, body: &str) {
    let eval = document::eval(
        r#"
        const [title, body] = await dioxus.recv();
        if ("Notification" in window && Notification.permission === "granted") {
            new Notification(title, { body, icon: "/favicon.ico" });
        }
        "#,
    );
    if let Err(e) = eval.send((title, body)) {
        tracing::debug!("Could not show desktop notification: {}", e);
    }
}

/// Saves `bytes` as a download named `file_name`.
pub fn download_file(file_name: &str, mime: &str, bytes: Vec<u8>) {
    let eval = document::eval(
        r#"
        const [name, type, bytes] = await dioxus.recv();
        const blob = new Blob([new Uint8Array(bytes)], { type });
        const url = URL.createObjectURL(blob);
        const link = document.createElement("a");
        link.href = url;
        link.download = name;
        link.click();
        URL.revokeObjectURL(url);
        "#,
    );
    if let Err(e) = eval.send((file_name, mime, bytes)) {
        tracing::error!("Could not start the {} download: {}", file_name, e);
    }
}

/// Asks the push-messaging SDK for this browser's delivery token.
pub async fn push_token(vapid_key: Option<&str>) -> Option<String> {
    let eval = document::eval(
        r#"
        const vapidKey = await dioxus.recv();
        if (!window.firebase || !firebase.messaging) { return null; }
        const registration = await navigator.serviceWorker
            .register("/firebase-messaging-sw.js");
        const options = { serviceWorkerRegistration: registration };
        if (vapidKey) { options.vapidKey = vapidKey; }
        return await firebase.messaging().getToken(options);
        "#,
    );
    if eval.send(vapid_key).is_err() {
        return None;
    }

    match eval.join::<Option<String>>().await {
        Ok(token) => token,
        Err(e) => {
            tracing::error!("Failed to obtain push token: {}", e);
            None
        }
    }
}

/// Forwards foreground push messages to the hub until it shuts down.
pub async fn listen_push_messages(hub: NotificationHub) {
    let mut eval = document::eval(
        r#"
        if (!window.firebase || !firebase.messaging) { return; }
        firebase.messaging().onMessage((payload) => dioxus.send(payload));
        await new Promise(() => {});
        "#,
    );

    while !hub.is_shut_down() {
        match eval.recv::<PushMessageDto>().await {
            Ok(message) => {
                hub.on_push_message(&message);
            }
            Err(e) => {
                tracing::debug!("Push listener stopped: {}", e);
                break;
            }
        }
    }
}

/// Resolves after `millis` milliseconds using the page's timer.
pub async fn sleep(millis: u32) {
    let eval = document::eval(
        r#"
        const millis = await dioxus.recv();
        await new Promise((resolve) => setTimeout(resolve, millis));
        return true;
        "#,
    );
    if eval.send(millis).is_ok() {
        let _ = eval.join::<bool>().await;
    }
}
