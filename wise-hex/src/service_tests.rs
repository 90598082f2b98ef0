//! WiseService unit tests.

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::Mutex;

    use async_trait::async_trait;

    use name_match::MatchError;
    use wise_types::{
        ApiError, AppError, Currency, FundingMethod, FundingOutcome, PaymentsApi, Profile,
        ProfileId, ProfileType, Quote, QuoteId, QuoteRequest, Recipient, RecipientId,
        SendMoneyRequest, Transfer, TransferId, TransferRequest, TransferResult,
        UNKNOWN_ERROR_CODE,
    };

    use crate::WiseService;

    /// Scriptable in-memory API that records every call it receives.
    pub struct MockApi {
        pub calls: Mutex<Vec<&'static str>>,
        pub transfer_requests: Mutex<Vec<TransferRequest>>,
        pub recipient_filters: Mutex<Vec<Option<Currency>>>,
        pub profiles: Vec<Profile>,
        pub recipients: Vec<Recipient>,
        pub quote_error: Option<ApiError>,
        pub transfer_error: Option<ApiError>,
        pub fund_error: Option<ApiError>,
        pub funding: FundingOutcome,
        /// Overrides the target currency of returned quotes
        pub quoted_target: Option<Currency>,
    }

    impl MockApi {
        pub fn new() -> Self {
            Self {
                calls: Mutex::new(Vec::new()),
                transfer_requests: Mutex::new(Vec::new()),
                recipient_filters: Mutex::new(Vec::new()),
                profiles: vec![
                    profile("p1", ProfileType::Personal),
                    profile("b1", ProfileType::Business),
                ],
                recipients: vec![
                    recipient("r1", "Jon Smith"),
                    recipient("r2", "John Smith"),
                    recipient("r3", "Jane Doe"),
                ],
                quote_error: None,
                transfer_error: None,
                fund_error: None,
                funding: FundingOutcome::Completed,
                quoted_target: None,
            }
        }

        pub fn calls(&self) -> Vec<&'static str> {
            self.calls.lock().unwrap().clone()
        }

        fn record(&self, call: &'static str) {
            self.calls.lock().unwrap().push(call);
        }
    }

    pub fn profile(id: &str, profile_type: ProfileType) -> Profile {
        Profile {
            id: ProfileId::new(id),
            profile_type,
            full_name: None,
        }
    }

    pub fn recipient(id: &str, name: &str) -> Recipient {
        Recipient {
            id: RecipientId::new(id),
            profile_id: ProfileId::new("p1"),
            full_name: name.to_string(),
            currency: Currency::new("EUR"),
            country: "DE".to_string(),
            account_summary: None,
        }
    }

    fn remote(status: u16, message: &str) -> ApiError {
        ApiError::Remote {
            status,
            message: message.to_string(),
        }
    }

    #[async_trait]
    impl PaymentsApi for MockApi {
        async fn list_profiles(&self) -> Result<Vec<Profile>, ApiError> {
            self.record("list_profiles");
            Ok(self.profiles.clone())
        }

        async fn get_profile(&self, profile_id: &ProfileId) -> Result<Profile, ApiError> {
            self.record("get_profile");
            self.profiles
                .iter()
                .find(|p| &p.id == profile_id)
                .cloned()
                .ok_or_else(|| remote(404, "Profile not found"))
        }

        async fn list_recipients(
            &self,
            _profile_id: &ProfileId,
            currency: Option<&Currency>,
        ) -> Result<Vec<Recipient>, ApiError> {
            self.record("list_recipients");
            self.recipient_filters
                .lock()
                .unwrap()
                .push(currency.cloned());
            Ok(self.recipients.clone())
        }

        async fn create_quote(&self, req: QuoteRequest) -> Result<Quote, ApiError> {
            self.record("create_quote");
            if let Some(err) = &self.quote_error {
                return Err(err.clone());
            }
            Ok(Quote {
                id: QuoteId::new("q1"),
                source_currency: req.source_currency,
                target_currency: self.quoted_target.clone().unwrap_or(req.target_currency),
                source_amount: req.source_amount,
                target_amount: None,
                rate: None,
                target_account: Some(req.recipient_id),
                expiration_time: None,
            })
        }

        async fn create_transfer(&self, req: TransferRequest) -> Result<Transfer, ApiError> {
            self.record("create_transfer");
            self.transfer_requests.lock().unwrap().push(req.clone());
            if let Some(err) = &self.transfer_error {
                return Err(err.clone());
            }
            Ok(Transfer {
                id: TransferId::new("t1"),
                quote_id: req.quote_id,
                recipient_id: req.recipient_id,
                idempotency_token: req.idempotency_token,
                reference: req.reference,
                status: Some("incoming_payment_waiting".to_string()),
            })
        }

        async fn fund_transfer(
            &self,
            _profile_id: &ProfileId,
            _transfer_id: &TransferId,
            _method: FundingMethod,
        ) -> Result<FundingOutcome, ApiError> {
            self.record("fund_transfer");
            if let Some(err) = &self.fund_error {
                return Err(err.clone());
            }
            Ok(self.funding.clone())
        }
    }

    fn send_request() -> SendMoneyRequest {
        SendMoneyRequest {
            profile_id: ProfileId::new("p1"),
            source_currency: Currency::new("USD"),
            target_currency: Currency::new("EUR"),
            source_amount: 100.0,
            recipient_id: RecipientId::new("r1"),
            reference: None,
            source_of_funds: None,
            funding_method: None,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // send_money
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_send_money_completed() {
        let service = WiseService::new(MockApi::new());

        let result = service.send_money(send_request()).await.unwrap();

        assert_eq!(
            result,
            TransferResult::Completed {
                transfer_id: TransferId::new("t1")
            }
        );
        assert_eq!(
            service.api().calls(),
            vec!["create_quote", "create_transfer", "fund_transfer"]
        );
    }

    #[tokio::test]
    async fn test_unsupported_funding_method_makes_no_calls() {
        let service = WiseService::new(MockApi::new());

        let result = service
            .send_money(SendMoneyRequest {
                funding_method: Some("CARD".to_string()),
                ..send_request()
            })
            .await;

        assert!(matches!(result, Err(AppError::UnsupportedFundingMethod(m)) if m == "CARD"));
        assert!(service.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_explicit_balance_method_accepted() {
        let service = WiseService::new(MockApi::new());

        let result = service
            .send_money(SendMoneyRequest {
                funding_method: Some("BALANCE".to_string()),
                ..send_request()
            })
            .await;

        assert!(matches!(result, Ok(TransferResult::Completed { .. })));
    }

    #[tokio::test]
    async fn test_quote_failure_stops_everything() {
        let mut api = MockApi::new();
        api.quote_error = Some(remote(422, "Unsupported currency pair"));
        let service = WiseService::new(api);

        let result = service.send_money(send_request()).await;

        assert!(matches!(
            result,
            Err(AppError::QuoteFailed(ApiError::Remote { status: 422, .. }))
        ));
        assert_eq!(service.api().calls(), vec!["create_quote"]);
    }

    #[tokio::test]
    async fn test_mismatched_quote_is_rejected() {
        let mut api = MockApi::new();
        api.quoted_target = Some(Currency::new("GBP"));
        let service = WiseService::new(api);

        let result = service.send_money(send_request()).await;

        assert!(matches!(
            result,
            Err(AppError::QuoteFailed(ApiError::Decode(_)))
        ));
        assert_eq!(service.api().calls(), vec!["create_quote"]);
    }

    #[tokio::test]
    async fn test_transfer_failure_skips_funding() {
        let mut api = MockApi::new();
        api.transfer_error = Some(remote(400, "Recipient is inactive"));
        let service = WiseService::new(api);

        let result = service.send_money(send_request()).await;

        assert!(matches!(result, Err(AppError::TransferCreationFailed(_))));
        assert_eq!(service.api().calls(), vec!["create_quote", "create_transfer"]);
    }

    #[tokio::test]
    async fn test_funding_request_failure_names_transfer() {
        let mut api = MockApi::new();
        api.fund_error = Some(ApiError::Transport("connection reset".into()));
        let service = WiseService::new(api);

        let result = service.send_money(send_request()).await;

        match result {
            Err(AppError::FundingRequestFailed {
                transfer_id,
                source,
            }) => {
                assert_eq!(transfer_id, TransferId::new("t1"));
                assert_eq!(source, ApiError::Transport("connection reset".into()));
            }
            other => panic!("expected FundingRequestFailed, got {:?}", other),
        }
        assert_eq!(service.api().calls().len(), 3);
    }

    #[tokio::test]
    async fn test_step_up_required() {
        let mut api = MockApi::new();
        api.funding = FundingOutcome::StepUpRequired {
            one_time_token: "ott-42".to_string(),
        };
        let service = WiseService::new(api);

        let result = service.send_money(send_request()).await.unwrap();

        assert_eq!(
            result,
            TransferResult::StepUpRequired {
                transfer_id: TransferId::new("t1"),
                one_time_token: "ott-42".to_string(),
            }
        );
        assert!(!result.is_completed());
    }

    #[tokio::test]
    async fn test_funding_failed_without_code_reports_unknown() {
        let mut api = MockApi::new();
        api.funding = FundingOutcome::classify(None, Some("REJECTED"), None);
        let service = WiseService::new(api);

        let result = service.send_money(send_request()).await.unwrap();

        assert_eq!(
            result,
            TransferResult::Failed {
                transfer_id: TransferId::new("t1"),
                error_code: UNKNOWN_ERROR_CODE.to_string(),
            }
        );
    }

    #[tokio::test]
    async fn test_reference_defaults_to_money() {
        let service = WiseService::new(MockApi::new());

        service.send_money(send_request()).await.unwrap();
        service
            .send_money(SendMoneyRequest {
                reference: Some("rent".to_string()),
                source_of_funds: Some("salary".to_string()),
                ..send_request()
            })
            .await
            .unwrap();

        let requests = service.api().transfer_requests.lock().unwrap().clone();
        assert_eq!(requests[0].reference, "money");
        assert_eq!(requests[0].source_of_funds, None);
        assert_eq!(requests[0].quote_id, QuoteId::new("q1"));
        assert_eq!(requests[1].reference, "rent");
        assert_eq!(requests[1].source_of_funds.as_deref(), Some("salary"));
    }

    #[tokio::test]
    async fn test_each_send_uses_fresh_idempotency_token() {
        let service = WiseService::new(MockApi::new());

        service.send_money(send_request()).await.unwrap();
        service.send_money(send_request()).await.unwrap();

        let requests = service.api().transfer_requests.lock().unwrap().clone();
        assert_ne!(requests[0].idempotency_token, requests[1].idempotency_token);
    }

    #[tokio::test]
    async fn test_invalid_amounts_fail_fast() {
        let service = WiseService::new(MockApi::new());

        for amount in [0.0, -5.0, f64::NAN, f64::INFINITY] {
            let result = service
                .send_money(SendMoneyRequest {
                    source_amount: amount,
                    ..send_request()
                })
                .await;
            assert!(matches!(result, Err(AppError::InvalidRequest(_))));
        }
        assert!(service.api().calls().is_empty());
    }

    #[tokio::test]
    async fn test_blank_ids_fail_fast() {
        let service = WiseService::new(MockApi::new());

        let result = service
            .send_money(SendMoneyRequest {
                recipient_id: RecipientId::new(""),
                ..send_request()
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        let result = service
            .send_money(SendMoneyRequest {
                profile_id: ProfileId::new(" "),
                ..send_request()
            })
            .await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));

        assert!(service.api().calls().is_empty());
    }

    // ─────────────────────────────────────────────────────────────────────────────
    // Profiles & Recipients
    // ─────────────────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_resolve_profile_by_type() {
        let service = WiseService::new(MockApi::new());

        let personal = service.resolve_profile(ProfileType::Personal).await.unwrap();
        let business = service.resolve_profile(ProfileType::Business).await.unwrap();

        assert_eq!(personal.id, ProfileId::new("p1"));
        assert_eq!(business.id, ProfileId::new("b1"));
    }

    #[tokio::test]
    async fn test_resolve_profile_missing_type() {
        let mut api = MockApi::new();
        api.profiles = vec![
            profile("p1", ProfileType::Personal),
            profile("p2", ProfileType::Personal),
        ];
        let service = WiseService::new(api);

        let result = service.resolve_profile(ProfileType::Business).await;

        match result {
            Err(AppError::ProfileNotFound {
                requested,
                available,
            }) => {
                assert_eq!(requested, "business");
                assert_eq!(available, "personal");
            }
            other => panic!("expected ProfileNotFound, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_resolve_profile_none_at_all() {
        let mut api = MockApi::new();
        api.profiles = Vec::new();
        let service = WiseService::new(api);

        let result = service.resolve_profile(ProfileType::Personal).await;

        assert!(matches!(result, Err(AppError::NoProfiles)));
    }

    #[tokio::test]
    async fn test_get_profile_not_found() {
        let service = WiseService::new(MockApi::new());

        let result = service.get_profile(&ProfileId::new("nope")).await;

        assert!(matches!(
            result,
            Err(AppError::Remote(ApiError::Remote { status: 404, .. }))
        ));
    }

    #[tokio::test]
    async fn test_list_recipients_forwards_currency() {
        let service = WiseService::new(MockApi::new());

        let recipients = service
            .list_recipients(ProfileType::Personal, Some(Currency::new("eur")))
            .await
            .unwrap();

        assert_eq!(recipients.len(), 3);
        assert_eq!(
            service.api().recipient_filters.lock().unwrap().clone(),
            vec![Some(Currency::new("EUR"))]
        );
        assert_eq!(service.api().calls(), vec!["list_profiles", "list_recipients"]);
    }

    #[tokio::test]
    async fn test_find_recipient_exact_name() {
        let service = WiseService::new(MockApi::new());

        let found = service
            .find_recipient(ProfileType::Personal, "John Smith", None)
            .await
            .unwrap();

        assert_eq!(found.recipient.id, RecipientId::new("r2"));
        assert_eq!(found.score, 1.0);
    }

    #[tokio::test]
    async fn test_find_recipient_fuzzy_name() {
        let service = WiseService::new(MockApi::new());

        let found = service
            .find_recipient(ProfileType::Personal, "jane doh", None)
            .await
            .unwrap();

        assert_eq!(found.recipient.full_name, "Jane Doe");
        assert!(found.score < 1.0);
    }

    #[tokio::test]
    async fn test_find_recipient_without_recipients() {
        let mut api = MockApi::new();
        api.recipients = Vec::new();
        let service = WiseService::new(api);

        let result = service
            .find_recipient(ProfileType::Personal, "Anyone", None)
            .await;

        assert!(matches!(result, Err(AppError::Match(MatchError::EmptyInput))));
    }

    #[tokio::test]
    async fn test_find_recipient_all_names_empty() {
        let mut api = MockApi::new();
        api.recipients = vec![recipient("r1", ""), recipient("r2", "")];
        let service = WiseService::new(api);

        let result = service
            .find_recipient(ProfileType::Personal, "Anyone", None)
            .await;

        assert!(matches!(
            result,
            Err(AppError::Match(MatchError::NoMatch { .. }))
        ));
    }
}
