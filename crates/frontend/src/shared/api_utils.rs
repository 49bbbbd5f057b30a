//! API utilities for frontend-backend communication
//!
//! URL helpers plus thin JSON wrappers over `window.fetch`.

use contracts::shared::logger::CreateLogRequest;
use serde::de::DeserializeOwned;
use serde::Serialize;
use wasm_bindgen::JsCast;
use web_sys::{Request, RequestInit, RequestMode, Response};

/// Base URL of the backend: same host as the page, port 3000.
/// Empty string if window is not available.
pub fn api_base() -> String {
    let window = match web_sys::window() {
        Some(w) => w,
        None => return String::new(),
    };
    let location = window.location();
    let protocol = location.protocol().unwrap_or_else(|_| "http:".to_string());
    let hostname = location
        .hostname()
        .unwrap_or_else(|_| "127.0.0.1".to_string());
    format!("{}//{}:3000", protocol, hostname)
}

/// Build a full API URL from a path starting with "/api/"
pub fn api_url(path: &str) -> String {
    format!("{}{}", api_base(), path)
}

/// Текст ошибки для HTTP-статуса ответа
pub fn describe_status(status: u16) -> String {
    match status {
        400 => "Некорректные данные (HTTP 400)".to_string(),
        404 => "Запись не найдена (HTTP 404)".to_string(),
        500..=599 => format!("Ошибка сервера (HTTP {})", status),
        other => format!("HTTP {}", other),
    }
}

async fn send(method: &str, path: &str, body: Option<String>) -> Result<String, String> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(json) = body.as_ref() {
        opts.set_body(&wasm_bindgen::JsValue::from_str(json));
    }

    let request =
        Request::new_with_str_and_init(&api_url(path), &opts).map_err(|e| format!("{e:?}"))?;
    request
        .headers()
        .set("Accept", "application/json")
        .map_err(|e| format!("{e:?}"))?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(|e| format!("{e:?}"))?;
    }

    let window = web_sys::window().ok_or_else(|| "no window".to_string())?;
    let resp_value = wasm_bindgen_futures::JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(|e| format!("{e:?}"))?;
    let resp: Response = resp_value.dyn_into().map_err(|e| format!("{e:?}"))?;

    if !resp.ok() {
        return Err(describe_status(resp.status()));
    }

    let text = wasm_bindgen_futures::JsFuture::from(resp.text().map_err(|e| format!("{e:?}"))?)
        .await
        .map_err(|e| format!("{e:?}"))?;
    text.as_string().ok_or_else(|| "bad text".to_string())
}

/// GET path → T
pub async fn get_json<T: DeserializeOwned>(path: &str) -> Result<T, String> {
    let text = send("GET", path, None).await?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

/// POST/PUT body → T
pub async fn send_json<B: Serialize, T: DeserializeOwned>(
    method: &str,
    path: &str,
    body: &B,
) -> Result<T, String> {
    let json = serde_json::to_string(body).map_err(|e| format!("{e}"))?;
    let text = send(method, path, Some(json)).await?;
    serde_json::from_str(&text).map_err(|e| format!("{e}"))
}

/// POST без тела, ответ игнорируется
pub async fn post_empty(path: &str) -> Result<(), String> {
    send("POST", path, None).await.map(|_| ())
}

pub async fn delete(path: &str) -> Result<(), String> {
    send("DELETE", path, None).await.map(|_| ())
}

/// Дублирует ошибку клиента в журнал событий на сервере
pub fn log_to_server(category: &str, message: impl Into<String>) {
    let request = CreateLogRequest::client(category, message);
    let Ok(body) = serde_json::to_string(&request) else {
        return;
    };
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(e) = send("POST", "/api/logs", Some(body)).await {
            log::warn!("Не удалось записать событие в журнал: {}", e);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_status() {
        assert_eq!(describe_status(404), "Запись не найдена (HTTP 404)");
        assert_eq!(describe_status(503), "Ошибка сервера (HTTP 503)");
        assert_eq!(describe_status(418), "HTTP 418");
    }
}
