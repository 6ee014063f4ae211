//! Frankfurter provider tests against a local stub server.

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    use axum::{
        Json, Router,
        http::{StatusCode, Uri},
        response::IntoResponse,
    };
    use chrono::NaiveDate;
    use fx_types::{Currency, CurrencyPair, ProviderError, RateProvider, RateWindow};
    use serde_json::json;

    use crate::retry::tests::RecordingSleeper;
    use crate::{FrankfurterProvider, ProviderConfig, RetryPolicy};

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{}/v1", addr)
    }

    fn provider(base_url: &str, sleeper: &Arc<RecordingSleeper>) -> FrankfurterProvider {
        FrankfurterProvider::new(ProviderConfig {
            base_url: base_url.to_string(),
            timeout: Duration::from_millis(200),
            retry: RetryPolicy::default(),
        })
        .unwrap()
        .with_sleeper(sleeper.clone())
    }

    fn window() -> RateWindow {
        RateWindow::new(
            NaiveDate::from_ymd_opt(2025, 7, 1).unwrap(),
            NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(),
        )
    }

    #[tokio::test]
    async fn test_list_response_success() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let base = serve(Router::new().fallback(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                Json(json!([
                    {"date": "2025-07-01", "rate": 1.087},
                    {"date": "2025-07-02", "rate": 1.085},
                    {"date": "2025-07-03", "rate": 1.092}
                ]))
            }
        }))
        .await;
        let sleeper = Arc::new(RecordingSleeper::default());

        let dataset = provider(&base, &sleeper)
            .fetch_rates(window(), CurrencyPair::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dataset.rates(), vec![1.087, 1.085, 1.092]);
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_request_url_carries_range_and_pair() {
        let seen = Arc::new(Mutex::new(Vec::<String>::new()));
        let log = seen.clone();
        let base = serve(Router::new().fallback(move |uri: Uri| {
            let log = log.clone();
            async move {
                log.lock().unwrap().push(uri.to_string());
                Json(json!({"rates": {}}))
            }
        }))
        .await;
        let sleeper = Arc::new(RecordingSleeper::default());
        let pair = CurrencyPair::new(Currency::EUR, Currency::GBP);

        let result = provider(&base, &sleeper).fetch_rates(window(), pair).await;

        assert_eq!(result.unwrap().map(|d| d.len()), Some(0));
        assert_eq!(
            *seen.lock().unwrap(),
            vec!["/v1/2025-07-01..2025-07-03?from=EUR&to=GBP".to_string()]
        );
    }

    #[tokio::test]
    async fn test_rates_object_response_is_normalized() {
        let base = serve(Router::new().fallback(|| async {
            Json(json!({
                "amount": 1.0,
                "base": "EUR",
                "start_date": "2025-07-01",
                "end_date": "2025-07-03",
                "rates": {
                    "2025-07-01": {"USD": 1.087},
                    "2025-07-02": {"USD": 1.085},
                    "2025-07-03": {"USD": 1.092}
                }
            }))
        }))
        .await;
        let sleeper = Arc::new(RecordingSleeper::default());

        let dataset = provider(&base, &sleeper)
            .fetch_rates(window(), CurrencyPair::default())
            .await
            .unwrap()
            .unwrap();

        let got: Vec<_> = dataset
            .iter()
            .map(|r| (r.date.to_string(), r.rate))
            .collect();
        assert_eq!(
            got,
            vec![
                ("2025-07-01".to_string(), 1.087),
                ("2025-07-02".to_string(), 1.085),
                ("2025-07-03".to_string(), 1.092),
            ]
        );
    }

    #[tokio::test]
    async fn test_unexpected_shape_is_not_an_error() {
        let base = serve(Router::new().fallback(|| async {
            Json(json!({"unexpected": "format"}))
        }))
        .await;
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = provider(&base, &sleeper)
            .fetch_rates(window(), CurrencyPair::default())
            .await;

        assert_eq!(result, Ok(None));
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_timeout_on_every_attempt_exhausts_retries() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let base = serve(Router::new().fallback(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(Duration::from_secs(2)).await;
                Json(json!([]))
            }
        }))
        .await;
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = provider(&base, &sleeper)
            .fetch_rates(window(), CurrencyPair::default())
            .await;

        assert_eq!(
            result,
            Err(ProviderError::RetriesExhausted {
                attempts: 3,
                last: Box::new(ProviderError::Timeout),
            })
        );
        assert_eq!(hits.load(Ordering::SeqCst), 3);
        assert_eq!(
            sleeper.delays(),
            vec![Duration::from_secs(1), Duration::from_secs(2)]
        );
    }

    #[tokio::test]
    async fn test_server_error_is_retried_until_success() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let base = serve(Router::new().fallback(move || {
            let counter = counter.clone();
            async move {
                if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                    (StatusCode::SERVICE_UNAVAILABLE, "down").into_response()
                } else {
                    Json(json!([{"date": "2025-07-01", "rate": 1.087}])).into_response()
                }
            }
        }))
        .await;
        let sleeper = Arc::new(RecordingSleeper::default());

        let dataset = provider(&base, &sleeper)
            .fetch_rates(window(), CurrencyPair::default())
            .await
            .unwrap()
            .unwrap();

        assert_eq!(dataset.len(), 1);
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(sleeper.delays(), vec![Duration::from_secs(1)]);
    }

    #[tokio::test]
    async fn test_client_error_is_not_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let base = serve(Router::new().fallback(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                (StatusCode::NOT_FOUND, Json(json!({"message": "not found"})))
            }
        }))
        .await;
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = provider(&base, &sleeper)
            .fetch_rates(window(), CurrencyPair::default())
            .await;

        assert_eq!(result, Err(ProviderError::Client { status: 404 }));
        assert_eq!(hits.load(Ordering::SeqCst), 1);
        assert!(sleeper.delays().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_body_is_retried() {
        let hits = Arc::new(AtomicUsize::new(0));
        let counter = hits.clone();
        let base = serve(Router::new().fallback(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                "definitely not json"
            }
        }))
        .await;
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = provider(&base, &sleeper)
            .fetch_rates(window(), CurrencyPair::default())
            .await;

        assert!(matches!(
            result,
            Err(ProviderError::RetriesExhausted { attempts: 3, ref last })
                if matches!(**last, ProviderError::Decode(_))
        ));
        assert_eq!(hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_unreachable_provider_is_retried() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let sleeper = Arc::new(RecordingSleeper::default());

        let result = provider(&format!("http://{}", addr), &sleeper)
            .fetch_rates(window(), CurrencyPair::default())
            .await;

        assert!(matches!(
            result,
            Err(ProviderError::RetriesExhausted { attempts: 3, .. })
        ));
        assert_eq!(sleeper.delays().len(), 2);
    }
}
