//! Promotions Service

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use smallvec::SmallVec;
use sqlx::{Postgres, Transaction};
use storefront::{
    products::ItemRef,
    promotions::{
        PromotionUuid,
        code::PromotionCode,
        evaluation::{Evaluation, Ineligible, Needed, Step, Validation},
    },
};
use tracing::{Span, debug, info};

use crate::{
    database::Db,
    domain::{
        catalog::repository::PgCatalogRepository,
        customers::repository::PgCustomersRepository,
        promotions::{
            PromotionsServiceError,
            data::{NewPromotion, PromotionDefinition, ValidatePromotion},
            records::PromotionRecord,
            repository::PgPromotionsRepository,
        },
    },
};

#[derive(Debug, Clone)]
pub struct PgPromotionsService {
    db: Db,
    promotions: PgPromotionsRepository,
    catalog: PgCatalogRepository,
    customers: PgCustomersRepository,
}

impl PgPromotionsService {
    #[must_use]
    pub fn new(db: Db) -> Self {
        Self {
            db,
            promotions: PgPromotionsRepository::new(),
            catalog: PgCatalogRepository::new(),
            customers: PgCustomersRepository::new(),
        }
    }

    /// Drive the evaluation, fetching products and the customer only when
    /// a check asks for them.
    async fn evaluate(
        &self,
        tx: &mut Transaction<'_, Postgres>,
        code: &PromotionCode,
        request: &ValidatePromotion,
        point_in_time: Timestamp,
    ) -> Result<Validation, PromotionsServiceError> {
        let promotion = self
            .promotions
            .find_promotion_by_code(tx, code)
            .await?
            .map(|record| record.promotion);

        if let Some(promotion) = &promotion {
            Span::current().record("promotion_uuid", tracing::field::display(promotion.uuid));
        }

        let mut evaluation = Evaluation::new(promotion.as_ref(), request.order_total, point_in_time);

        loop {
            match evaluation.step()? {
                Step::Done(validation) => return Ok(validation),
                Step::Needs(Needed::Products) => {
                    let items: SmallVec<[ItemRef; 8]> =
                        request.items.iter().map(|line| line.item).collect();

                    let products = self.catalog.resolve_products(tx, &items).await?;

                    evaluation.provide_products(products);
                }
                Step::Needs(Needed::Requester) => {
                    let requester = self.customers.requester(tx, request.customer).await?;

                    evaluation.provide_requester(requester);
                }
            }
        }
    }
}

#[async_trait]
impl PromotionsService for PgPromotionsService {
    #[tracing::instrument(
        name = "promotions.service.create_promotion",
        skip(self, promotion),
        fields(
            promotion_uuid = %promotion.uuid,
            promotion_code = %promotion.definition.code,
            discount_type = promotion.definition.discount.kind().as_str(),
            applicable_product_count = promotion.definition.applicable_products.len()
        ),
        err
    )]
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.promotions.create_promotion(&mut tx, promotion).await?;

        tx.commit().await?;

        info!(promotion_uuid = %record.promotion.uuid, "created promotion");

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.update_promotion",
        skip(self, uuid, definition),
        fields(
            promotion_uuid = %uuid,
            promotion_code = %definition.code,
            discount_type = definition.discount.kind().as_str(),
            applicable_product_count = definition.applicable_products.len()
        ),
        err
    )]
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        definition: PromotionDefinition,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self
            .promotions
            .update_promotion(&mut tx, uuid, definition)
            .await?;

        tx.commit().await?;

        info!(promotion_uuid = %uuid, "updated promotion");

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.get_promotion",
        skip(self, uuid),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let record = self.promotions.get_promotion(&mut tx, uuid).await?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.get_promotion_by_code",
        skip(self, code),
        fields(promotion_code = %code),
        err
    )]
    async fn get_promotion_by_code(
        &self,
        code: String,
    ) -> Result<PromotionRecord, PromotionsServiceError> {
        let Ok(code) = PromotionCode::parse(&code) else {
            return Err(PromotionsServiceError::NotFound);
        };

        let mut tx = self.db.begin().await?;

        let record = self
            .promotions
            .find_promotion_by_code(&mut tx, &code)
            .await?
            .ok_or(PromotionsServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record)
    }

    #[tracing::instrument(
        name = "promotions.service.list_promotions",
        skip(self),
        fields(promotion_count = tracing::field::Empty),
        err
    )]
    async fn list_promotions(&self) -> Result<Vec<PromotionRecord>, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let records = self.promotions.list_promotions(&mut tx).await?;

        tx.commit().await?;

        Span::current().record("promotion_count", records.len());

        Ok(records)
    }

    #[tracing::instrument(
        name = "promotions.service.delete_promotion",
        skip(self, uuid),
        fields(promotion_uuid = %uuid),
        err
    )]
    async fn delete_promotion(&self, uuid: PromotionUuid) -> Result<(), PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let rows_affected = self.promotions.delete_promotion(&mut tx, uuid).await?;

        if rows_affected == 0 {
            return Err(PromotionsServiceError::NotFound);
        }

        tx.commit().await?;

        info!(promotion_uuid = %uuid, "deleted promotion");

        Ok(())
    }

    #[tracing::instrument(
        name = "promotions.service.validate_promotion",
        skip(self, request, point_in_time),
        fields(
            promotion_code = %request.code,
            order_total = request.order_total,
            item_count = request.items.len(),
            authenticated = request.customer.is_some(),
            promotion_uuid = tracing::field::Empty,
            eligible = tracing::field::Empty
        ),
        err
    )]
    async fn validate_promotion(
        &self,
        request: ValidatePromotion,
        point_in_time: Timestamp,
    ) -> Result<Validation, PromotionsServiceError> {
        let validation = match PromotionCode::parse(&request.code) {
            Ok(code) => {
                let mut tx = self.db.begin().await?;

                let validation = self
                    .evaluate(&mut tx, &code, &request, point_in_time)
                    .await?;

                tx.commit().await?;

                validation
            }
            Err(_malformed) => Validation::Ineligible(Ineligible::CodeNotFound),
        };

        Span::current().record("eligible", validation.is_eligible());

        if let Validation::Ineligible(reason) = validation {
            debug!(reason = reason.reason(), "promotion not applicable");
        }

        Ok(validation)
    }

    #[tracing::instrument(
        name = "promotions.service.record_redemption",
        skip(self, uuid),
        fields(promotion_uuid = %uuid, used_count = tracing::field::Empty),
        err
    )]
    async fn record_redemption(&self, uuid: PromotionUuid) -> Result<u64, PromotionsServiceError> {
        let mut tx = self.db.begin().await?;

        let used_count = self.promotions.increment_used_count(&mut tx, uuid).await?;

        tx.commit().await?;

        Span::current().record("used_count", used_count);

        info!(promotion_uuid = %uuid, used_count, "recorded promotion redemption");

        Ok(used_count)
    }
}

#[automock]
#[async_trait]
pub trait PromotionsService: Send + Sync {
    /// Creates a promotion. Codes must be unique among live promotions.
    async fn create_promotion(
        &self,
        promotion: NewPromotion,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Replaces a promotion's editable fields. The redemption count is kept.
    async fn update_promotion(
        &self,
        uuid: PromotionUuid,
        definition: PromotionDefinition,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Retrieve a single promotion.
    async fn get_promotion(
        &self,
        uuid: PromotionUuid,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Retrieve a promotion by code, matched case-insensitively.
    async fn get_promotion_by_code(
        &self,
        code: String,
    ) -> Result<PromotionRecord, PromotionsServiceError>;

    /// Retrieves every promotion that has not been deleted.
    async fn list_promotions(&self) -> Result<Vec<PromotionRecord>, PromotionsServiceError>;

    /// Soft-deletes a promotion; its code stops matching immediately.
    async fn delete_promotion(&self, uuid: PromotionUuid) -> Result<(), PromotionsServiceError>;

    /// Checks whether a code applies to an order at `point_in_time` and
    /// computes the discount. Has no side effects.
    async fn validate_promotion(
        &self,
        request: ValidatePromotion,
        point_in_time: Timestamp,
    ) -> Result<Validation, PromotionsServiceError>;

    /// Counts one confirmed redemption and returns the new total.
    async fn record_redemption(&self, uuid: PromotionUuid) -> Result<u64, PromotionsServiceError>;
}

#[cfg(test)]
mod tests {
    use jiff::SignedDuration;
    use storefront::{
        membership::{CustomerUuid, MembershipTier},
        products::{LineItem, ProductUuid, VariantUuid},
        promotions::{
            DiscountKind, PromotionDiscount, evaluation::AppliedDiscount, status::PromotionStatus,
        },
    };
    use testresult::TestResult;

    use crate::test::{TestContext, helpers};

    use super::*;

    fn request(code: &str, order_total: u64) -> ValidatePromotion {
        ValidatePromotion {
            code: code.to_string(),
            order_total,
            customer: None,
            items: Vec::new(),
        }
    }

    fn variant_line(variant: VariantUuid) -> LineItem {
        LineItem {
            item: ItemRef::Variant(variant),
            quantity: 1,
        }
    }

    #[tokio::test]
    async fn create_promotion_then_get_returns_it() -> TestResult {
        let ctx = TestContext::new().await;
        let shoes = helpers::create_product(&ctx, "Shoes").await?;

        let definition = PromotionDefinition {
            applicable_products: [shoes.uuid].into_iter().collect(),
            membership: Some(MembershipTier::Silver),
            max_uses: 50,
            ..helpers::definition(
                "shoes15",
                PromotionDiscount::PercentageOff {
                    percentage: 15,
                    max_discount: Some(200_000),
                },
            )?
        };

        let created = helpers::create_promotion(&ctx, definition.clone()).await?;

        assert_eq!(created.promotion.code.as_str(), "SHOES15");
        assert_eq!(created.promotion.used_count, 0);

        let fetched = ctx.promotions.get_promotion(created.promotion.uuid).await?;

        assert_eq!(fetched.promotion.discount, definition.discount);
        assert_eq!(fetched.promotion.membership, Some(MembershipTier::Silver));
        assert_eq!(fetched.promotion.max_uses, 50);
        assert!(fetched.promotion.applicable_products.contains(&shoes.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn duplicate_code_in_any_case_returns_already_exists() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_promotion(
            &ctx,
            helpers::definition("SUMMER", PromotionDiscount::AmountOff { amount: 10_000 })?,
        )
        .await?;

        let result = helpers::create_promotion(
            &ctx,
            helpers::definition("summer", PromotionDiscount::AmountOff { amount: 5_000 })?,
        )
        .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::AlreadyExists)),
            "expected AlreadyExists, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn percentage_above_one_hundred_is_invalid_data() -> TestResult {
        let ctx = TestContext::new().await;

        let result = helpers::create_promotion(
            &ctx,
            helpers::definition(
                "TOOMUCH",
                PromotionDiscount::PercentageOff {
                    percentage: 150,
                    max_discount: None,
                },
            )?,
        )
        .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::InvalidData)),
            "expected InvalidData, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn restricting_to_unknown_product_is_invalid_reference() -> TestResult {
        let ctx = TestContext::new().await;

        let result = helpers::create_promotion(
            &ctx,
            PromotionDefinition {
                applicable_products: [ProductUuid::new()].into_iter().collect(),
                ..helpers::definition("GHOST", PromotionDiscount::AmountOff { amount: 1_000 })?
            },
        )
        .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::InvalidReference)),
            "expected InvalidReference, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn update_promotion_replaces_products_and_keeps_used_count() -> TestResult {
        let ctx = TestContext::new().await;
        let hats = helpers::create_product(&ctx, "Hats").await?;
        let scarves = helpers::create_product(&ctx, "Scarves").await?;

        let created = helpers::create_promotion(
            &ctx,
            PromotionDefinition {
                applicable_products: [hats.uuid].into_iter().collect(),
                ..helpers::definition("WINTER", PromotionDiscount::AmountOff { amount: 5_000 })?
            },
        )
        .await?;

        let uuid = created.promotion.uuid;

        ctx.promotions.record_redemption(uuid).await?;

        let updated = ctx
            .promotions
            .update_promotion(
                uuid,
                PromotionDefinition {
                    applicable_products: [scarves.uuid].into_iter().collect(),
                    ..helpers::definition(
                        "WINTER",
                        PromotionDiscount::AmountOff { amount: 7_500 },
                    )?
                },
            )
            .await?;

        assert_eq!(
            updated.promotion.discount,
            PromotionDiscount::AmountOff { amount: 7_500 }
        );
        assert_eq!(updated.promotion.used_count, 1);

        let fetched = ctx.promotions.get_promotion(uuid).await?;

        assert!(fetched.promotion.applicable_products.contains(&scarves.uuid));
        assert!(!fetched.promotion.applicable_products.contains(&hats.uuid));

        Ok(())
    }

    #[tokio::test]
    async fn update_promotion_unknown_uuid_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let result = ctx
            .promotions
            .update_promotion(
                PromotionUuid::new(),
                helpers::definition("NOPE", PromotionDiscount::AmountOff { amount: 1 })?,
            )
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn list_promotions_omits_deleted_and_derives_status() -> TestResult {
        let ctx = TestContext::new().await;
        let now = Timestamp::now();

        let live = helpers::create_promotion(
            &ctx,
            helpers::definition("LIVE", PromotionDiscount::AmountOff { amount: 1_000 })?,
        )
        .await?;

        let ended = helpers::create_promotion(
            &ctx,
            PromotionDefinition {
                starts_at: Some(now - SignedDuration::from_hours(48)),
                ends_at: Some(now - SignedDuration::from_hours(24)),
                ..helpers::definition("ENDED", PromotionDiscount::AmountOff { amount: 1_000 })?
            },
        )
        .await?;

        let deleted = helpers::create_promotion(
            &ctx,
            helpers::definition("GONE", PromotionDiscount::AmountOff { amount: 1_000 })?,
        )
        .await?;

        ctx.promotions
            .delete_promotion(deleted.promotion.uuid)
            .await?;

        let records = ctx.promotions.list_promotions().await?;

        let statuses: Vec<(PromotionUuid, PromotionStatus)> = records
            .iter()
            .map(|record| (record.promotion.uuid, record.promotion.status_at(now)))
            .collect();

        assert_eq!(
            statuses,
            vec![
                (live.promotion.uuid, PromotionStatus::Active),
                (ended.promotion.uuid, PromotionStatus::Expired),
            ]
        );

        Ok(())
    }

    #[tokio::test]
    async fn deleted_code_can_be_reused_and_no_longer_matches() -> TestResult {
        let ctx = TestContext::new().await;

        let first = helpers::create_promotion(
            &ctx,
            helpers::definition("AGAIN", PromotionDiscount::AmountOff { amount: 1_000 })?,
        )
        .await?;

        ctx.promotions.delete_promotion(first.promotion.uuid).await?;

        let validation = ctx
            .promotions
            .validate_promotion(request("again", 10_000), Timestamp::now())
            .await?;

        assert_eq!(
            validation,
            Validation::Ineligible(Ineligible::CodeNotFound)
        );

        let second = helpers::create_promotion(
            &ctx,
            helpers::definition("AGAIN", PromotionDiscount::AmountOff { amount: 2_000 })?,
        )
        .await?;

        let found = ctx
            .promotions
            .get_promotion_by_code("again".to_string())
            .await?;

        assert_eq!(found.promotion.uuid, second.promotion.uuid);

        Ok(())
    }

    #[tokio::test]
    async fn delete_promotion_twice_returns_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        let created = helpers::create_promotion(
            &ctx,
            helpers::definition("ONCE", PromotionDiscount::AmountOff { amount: 1_000 })?,
        )
        .await?;

        ctx.promotions
            .delete_promotion(created.promotion.uuid)
            .await?;

        let result = ctx
            .promotions
            .delete_promotion(created.promotion.uuid)
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );

        Ok(())
    }

    #[tokio::test]
    async fn validate_matches_codes_case_insensitively() -> TestResult {
        let ctx = TestContext::new().await;

        let created = helpers::create_promotion(
            &ctx,
            helpers::definition(
                "Welcome10",
                PromotionDiscount::PercentageOff {
                    percentage: 10,
                    max_discount: None,
                },
            )?,
        )
        .await?;

        let validation = ctx
            .promotions
            .validate_promotion(request("  welcome10 ", 250_000), Timestamp::now())
            .await?;

        assert_eq!(
            validation,
            Validation::Eligible(AppliedDiscount {
                promotion: created.promotion.uuid,
                kind: DiscountKind::Percentage,
                discount_amount: 25_000,
                shipping_discount: 0,
            })
        );

        Ok(())
    }

    #[tokio::test]
    async fn validate_unknown_or_blank_code_is_not_found() -> TestResult {
        let ctx = TestContext::new().await;

        for code in ["MISSING", "   "] {
            let validation = ctx
                .promotions
                .validate_promotion(request(code, 10_000), Timestamp::now())
                .await?;

            assert_eq!(
                validation,
                Validation::Ineligible(Ineligible::CodeNotFound)
            );
        }

        Ok(())
    }

    #[tokio::test]
    async fn validate_resolves_variants_to_products() -> TestResult {
        let ctx = TestContext::new().await;
        let dress = helpers::create_product(&ctx, "Dress").await?;
        let socks = helpers::create_product(&ctx, "Socks").await?;
        let dress_m = helpers::create_variant(&ctx, dress.uuid, "DRESS-M").await?;
        let socks_m = helpers::create_variant(&ctx, socks.uuid, "SOCKS-M").await?;

        helpers::create_promotion(
            &ctx,
            PromotionDefinition {
                applicable_products: [dress.uuid].into_iter().collect(),
                ..helpers::definition("DRESSUP", PromotionDiscount::AmountOff { amount: 50_000 })?
            },
        )
        .await?;

        let without_dress = ValidatePromotion {
            items: vec![variant_line(socks_m.uuid), variant_line(VariantUuid::new())],
            ..request("DRESSUP", 300_000)
        };

        assert_eq!(
            ctx.promotions
                .validate_promotion(without_dress, Timestamp::now())
                .await?,
            Validation::Ineligible(Ineligible::ProductNotApplicable)
        );

        let with_dress = ValidatePromotion {
            items: vec![variant_line(VariantUuid::new()), variant_line(dress_m.uuid)],
            ..request("DRESSUP", 300_000)
        };

        assert!(
            ctx.promotions
                .validate_promotion(with_dress, Timestamp::now())
                .await?
                .is_eligible()
        );

        Ok(())
    }

    #[tokio::test]
    async fn validate_checks_membership_tier_of_stored_customer() -> TestResult {
        let ctx = TestContext::new().await;
        let gold = helpers::create_customer(&ctx, Some(MembershipTier::Gold)).await?;
        let silver = helpers::create_customer(&ctx, Some(MembershipTier::Silver)).await?;

        helpers::create_promotion(
            &ctx,
            PromotionDefinition {
                membership: Some(MembershipTier::Gold),
                ..helpers::definition("GOLDEN", PromotionDiscount::ShippingOff { amount: 30_000 })?
            },
        )
        .await?;

        let as_customer = |customer: Option<CustomerUuid>| ValidatePromotion {
            customer,
            ..request("GOLDEN", 100_000)
        };

        assert_eq!(
            ctx.promotions
                .validate_promotion(as_customer(None), Timestamp::now())
                .await?,
            Validation::Ineligible(Ineligible::MembershipRequired {
                tier: MembershipTier::Gold
            })
        );

        assert_eq!(
            ctx.promotions
                .validate_promotion(as_customer(Some(silver.uuid)), Timestamp::now())
                .await?,
            Validation::Ineligible(Ineligible::WrongMembershipTier {
                required: MembershipTier::Gold
            })
        );

        assert_eq!(
            ctx.promotions
                .validate_promotion(as_customer(Some(CustomerUuid::new())), Timestamp::now())
                .await?,
            Validation::Ineligible(Ineligible::WrongMembershipTier {
                required: MembershipTier::Gold
            })
        );

        let Validation::Eligible(applied) = ctx
            .promotions
            .validate_promotion(as_customer(Some(gold.uuid)), Timestamp::now())
            .await?
        else {
            return Err("gold member should be eligible".into());
        };

        assert_eq!(applied.discount_amount, 0);
        assert_eq!(applied.shipping_discount, 30_000);

        Ok(())
    }

    #[tokio::test]
    async fn validation_does_not_consume_uses() -> TestResult {
        let ctx = TestContext::new().await;

        let created = helpers::create_promotion(
            &ctx,
            PromotionDefinition {
                max_uses: 1,
                ..helpers::definition("SINGLE", PromotionDiscount::AmountOff { amount: 1_000 })?
            },
        )
        .await?;

        for _ in 0..3 {
            assert!(
                ctx.promotions
                    .validate_promotion(request("SINGLE", 10_000), Timestamp::now())
                    .await?
                    .is_eligible()
            );
        }

        let fetched = ctx.promotions.get_promotion(created.promotion.uuid).await?;

        assert_eq!(fetched.promotion.used_count, 0);

        Ok(())
    }

    #[tokio::test]
    async fn redemptions_exhaust_the_promotion() -> TestResult {
        let ctx = TestContext::new().await;

        let created = helpers::create_promotion(
            &ctx,
            PromotionDefinition {
                max_uses: 2,
                ..helpers::definition("TWICE", PromotionDiscount::AmountOff { amount: 1_000 })?
            },
        )
        .await?;

        let uuid = created.promotion.uuid;

        assert_eq!(ctx.promotions.record_redemption(uuid).await?, 1);
        assert_eq!(ctx.promotions.record_redemption(uuid).await?, 2);

        assert_eq!(
            ctx.promotions
                .validate_promotion(request("TWICE", 10_000), Timestamp::now())
                .await?,
            Validation::Ineligible(Ineligible::UsageLimitReached)
        );

        Ok(())
    }

    #[tokio::test]
    async fn concurrent_redemptions_are_all_counted() -> TestResult {
        let ctx = TestContext::new().await;

        let created = helpers::create_promotion(
            &ctx,
            helpers::definition("RUSH", PromotionDiscount::AmountOff { amount: 1_000 })?,
        )
        .await?;

        let uuid = created.promotion.uuid;

        let mut handles = Vec::new();

        for _ in 0..10 {
            let promotions = ctx.promotions.clone();

            handles.push(tokio::spawn(async move {
                promotions.record_redemption(uuid).await
            }));
        }

        for handle in handles {
            handle.await??;
        }

        let fetched = ctx.promotions.get_promotion(uuid).await?;

        assert_eq!(fetched.promotion.used_count, 10);

        Ok(())
    }

    #[tokio::test]
    async fn record_redemption_unknown_uuid_returns_not_found() {
        let ctx = TestContext::new().await;

        let result = ctx
            .promotions
            .record_redemption(PromotionUuid::new())
            .await;

        assert!(
            matches!(result, Err(PromotionsServiceError::NotFound)),
            "expected NotFound, got {result:?}"
        );
    }

    #[tokio::test]
    async fn unrestricted_promotion_ignores_items() -> TestResult {
        let ctx = TestContext::new().await;

        helpers::create_promotion(
            &ctx,
            helpers::definition("ANYTHING", PromotionDiscount::AmountOff { amount: 9_000 })?,
        )
        .await?;

        let validation = ctx
            .promotions
            .validate_promotion(
                ValidatePromotion {
                    items: vec![variant_line(VariantUuid::new())],
                    ..request("ANYTHING", 1_000)
                },
                Timestamp::now(),
            )
            .await?;

        let Validation::Eligible(applied) = validation else {
            return Err("unrestricted promotion should apply".into());
        };

        // Fixed discounts are not capped at the order total.
        assert_eq!(applied.discount_amount, 9_000);
        assert_eq!(applied.kind, DiscountKind::Fixed);

        Ok(())
    }
}
