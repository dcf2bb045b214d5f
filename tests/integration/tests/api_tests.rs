//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variable: DATABASE_URL
//!
//! Run with: cargo test -p integration-tests --test api_tests

use futures::future::join_all;
use integration_tests::{assert_status, check_test_env, fixtures::*, TestServer};
use reqwest::StatusCode;

/// A bot with one product priced `price` and the given accounts in its pool
async fn seed_store(server: &TestServer, price: i64, accounts: &str) -> (String, String) {
    let bot_id = unique_id().to_string();
    let product_id = format!("nf-{bot_id}");

    let _: BotBody = server
        .data(
            "/api/bot/create",
            &[("id", bot_id.as_str()), ("name", "Test Store")],
            StatusCode::CREATED,
        )
        .await
        .unwrap();
    let _: ProductBody = server
        .data(
            "/api/product/add",
            &[
                ("botId", bot_id.as_str()),
                ("productData", product_data(&product_id, "Netflix", price).as_str()),
            ],
            StatusCode::CREATED,
        )
        .await
        .unwrap();
    if !accounts.is_empty() {
        let _: StockBody = server
            .data(
                "/api/product/stock/add",
                &[("botId", bot_id.as_str()), ("productId", product_id.as_str()), ("accounts", accounts)],
                StatusCode::OK,
            )
            .await
            .unwrap();
    }

    (bot_id, product_id)
}

async fn seed_user(server: &TestServer, balance: i64) -> String {
    let user_id = unique_id().to_string();
    let _: UserBody = server
        .data("/api/user/register", &[("id", user_id.as_str())], StatusCode::CREATED)
        .await
        .unwrap();
    if balance != 0 {
        let _: UserBody = server
            .data(
                "/api/user/edit-balance",
                &[("id", user_id.as_str()), ("amount", balance.to_string().as_str())],
                StatusCode::OK,
            )
            .await
            .unwrap();
    }
    user_id
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_banner_and_health() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// User Tests
// ============================================================================

#[tokio::test]
async fn test_user_lifecycle() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let id = unique_id().to_string();

    let user: UserBody = server
        .data("/api/user/register", &[("id", id.as_str()), ("name", "Budi")], StatusCode::CREATED)
        .await
        .unwrap();
    assert_eq!(user.name, "Budi");
    assert_eq!(user.role, "member");
    assert!(user.is_telegram);

    let err = server
        .error("/api/user/register", &[("id", id.as_str())], StatusCode::CONFLICT)
        .await
        .unwrap();
    assert_eq!(err.code, "USER_ALREADY_EXISTS");

    let exists: bool = server
        .data("/api/user/check", &[("id", id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert!(exists);

    let user: UserBody = server
        .data("/api/user/edit-balance", &[("id", id.as_str()), ("amount", "5000")], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(user.balance, 5000);
    let user: UserBody = server
        .data("/api/user/edit-balance", &[("id", id.as_str()), ("amount", "-2000")], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(user.balance, 3000);

    let user: UserBody = server
        .data("/api/user/edit-role", &[("id", id.as_str()), ("role", "admin")], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(user.role, "admin");

    let user: UserBody = server
        .data(
            "/api/user/add-transaction",
            &[("userId", id.as_str()), ("totalTransaksi", "1"), ("totalMembeli", "2"), ("nominal", "700")],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert_eq!(user.transaksi, 1);
    assert_eq!(user.membeli, 2);
    assert_eq!(user.total_nominal_transaksi, 700);

    let telegram: Vec<UserBody> = server
        .data("/api/user/telegram", &[], StatusCode::OK)
        .await
        .unwrap();
    assert!(telegram.iter().any(|u| u.id.to_string() == id));

    let response = server
        .get_with("/api/user/delete", &[("userId", id.as_str())])
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let detail: Option<UserBody> = server
        .data("/api/user/detail", &[("id", id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert!(detail.is_none());
}

#[tokio::test]
async fn test_missing_parameter_is_bad_request() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let err = server
        .error("/api/user/edit-balance", &[("id", "1")], StatusCode::BAD_REQUEST)
        .await
        .unwrap();
    assert_eq!(err.code, "INVALID_QUERY_PARAMETER");
    assert!(!err.error.is_empty());
}

// ============================================================================
// Bot, Category and Product Tests
// ============================================================================

#[tokio::test]
async fn test_bot_detail_includes_catalog() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, product_id) = seed_store(&server, 25_000, "a1,a2").await;

    let _: CategoryBody = server
        .data(
            "/api/category/add",
            &[
                ("botId", bot_id.as_str()),
                ("categoryName", "Streaming"),
                ("productIds", format!("[\"{product_id}\"]").as_str()),
            ],
            StatusCode::CREATED,
        )
        .await
        .unwrap();

    let detail: Option<BotDetailBody> = server
        .data("/api/bot/detail", &[("id", bot_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    let detail = detail.expect("bot exists");
    assert_eq!(detail.bot.name, "Test Store");
    assert_eq!(detail.product[&product_id].account, vec!["a1", "a2"]);
    assert_eq!(detail.product_view["Streaming"].id, vec![product_id.clone()]);

    let missing: Option<BotDetailBody> = server
        .data("/api/bot/detail", &[("id", "-1")], StatusCode::OK)
        .await
        .unwrap();
    assert!(missing.is_none());
}

#[tokio::test]
async fn test_categories_and_views() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, _) = seed_store(&server, 1_000, "").await;

    let view: ProductViewBody = server
        .data(
            "/api/product/view/create",
            &[("botId", bot_id.as_str()), ("title", "Music")],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert!(!view.exist);

    let _: CategoryBody = server
        .data(
            "/api/product/view/add",
            &[("botId", bot_id.as_str()), ("title", "Music"), ("accounts", "sp,yt")],
            StatusCode::OK,
        )
        .await
        .unwrap();

    let view: ProductViewBody = server
        .data(
            "/api/product/view/create",
            &[("botId", bot_id.as_str()), ("title", "Music")],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert!(view.exist);
    assert_eq!(view.id, vec!["sp", "yt"]);

    let _: CategoryBody = server
        .data(
            "/api/category/update",
            &[("botId", bot_id.as_str()), ("categoryName", "Music"), ("productIds", "yt")],
            StatusCode::OK,
        )
        .await
        .unwrap();

    let list: std::collections::BTreeMap<String, Vec<String>> = server
        .data("/api/category/list", &[("botId", bot_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(list["Music"], vec!["yt"]);

    let response = server
        .get_with("/api/category/delete", &[("botId", bot_id.as_str()), ("categoryName", "Music")])
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let err = server
        .error(
            "/api/category/delete",
            &[("botId", bot_id.as_str()), ("categoryName", "Music")],
            StatusCode::NOT_FOUND,
        )
        .await
        .unwrap();
    assert_eq!(err.code, "UNKNOWN_CATEGORY");
}

#[tokio::test]
async fn test_product_edits() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, product_id) = seed_store(&server, 25_000, "k1").await;

    let product: ProductBody = server
        .data(
            "/api/product/edit/price",
            &[("botId", bot_id.as_str()), ("productId", product_id.as_str()), ("newPrice", "30000")],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert_eq!(product.price, 30_000);

    let product: ProductBody = server
        .data(
            "/api/product/edit/snk",
            &[("botId", bot_id.as_str()), ("productId", product_id.as_str()), ("newSnk", "1 month")],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert_eq!(product.snk, "1 month");

    let new_id = format!("{product_id}-hd");
    let product: ProductBody = server
        .data(
            "/api/product/edit/id",
            &[("botId", bot_id.as_str()), ("oldId", product_id.as_str()), ("newId", new_id.as_str())],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert_eq!(product.id, new_id);
    assert_eq!(product.account, vec!["k1"]);

    let err = server
        .error(
            "/api/product/detail",
            &[("botId", bot_id.as_str()), ("productId", product_id.as_str())],
            StatusCode::NOT_FOUND,
        )
        .await
        .unwrap();
    assert_eq!(err.code, "UNKNOWN_PRODUCT");

    let list: Vec<ProductSummaryBody> = server
        .data("/api/product/list", &[("botId", bot_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0].stock, 1);
}

// ============================================================================
// Inventory Tests
// ============================================================================

#[tokio::test]
async fn test_take_is_fifo_and_all_or_nothing() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, product_id) = seed_store(&server, 10_000, r#"["a1","a2","a3"]"#).await;
    let params = |total: &'static str| {
        [
            ("botId", bot_id.clone()),
            ("productId", product_id.clone()),
            ("total", total.to_string()),
        ]
    };

    let peek = params("2");
    let peek: Vec<(&str, &str)> = peek.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let accounts: Vec<String> = server
        .data("/api/product/account", &peek, StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(accounts, vec!["a1", "a2"]);

    let taken: Vec<String> = server
        .data("/api/product/take", &peek, StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(taken, vec!["a1", "a2"]);

    let err = server
        .error("/api/product/take", &peek, StatusCode::UNPROCESSABLE_ENTITY)
        .await
        .unwrap();
    assert_eq!(err.code, "INSUFFICIENT_STOCK");

    let all = params("10");
    let all: Vec<(&str, &str)> = all.iter().map(|(k, v)| (*k, v.as_str())).collect();
    let left: Vec<String> = server
        .data("/api/product/account", &all, StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(left, vec!["a3"]);
}

#[tokio::test]
async fn test_concurrent_takes_hand_out_each_account_once() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let accounts: Vec<String> = (0..10).map(|i| format!("acc-{i}")).collect();
    let (bot_id, product_id) = seed_store(&server, 1_000, &accounts.join(",")).await;

    let params = [
        ("botId", bot_id.as_str()),
        ("productId", product_id.as_str()),
        ("total", "2"),
    ];
    let takes = (0..6).map(|_| server.get_with("/api/product/take", &params));
    let responses = join_all(takes).await;

    let mut handed_out = Vec::new();
    for response in responses {
        let response = response.unwrap();
        if response.status() == StatusCode::OK {
            let body: Envelope<Vec<String>> = response.json().await.unwrap();
            handed_out.extend(body.data);
        } else {
            assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        }
    }

    handed_out.sort();
    let before = handed_out.len();
    handed_out.dedup();
    assert_eq!(before, handed_out.len(), "an account was handed out twice");
    assert_eq!(handed_out.len(), 10);
}

#[tokio::test]
async fn test_add_sold_counts_on_product_and_bot() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, product_id) = seed_store(&server, 1_000, "").await;

    let product: ProductBody = server
        .data(
            "/api/product/sold/add",
            &[("botId", bot_id.as_str()), ("productId", product_id.as_str()), ("totalTerjual", "4")],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert_eq!(product.terjual, 4);

    let detail: Option<BotDetailBody> = server
        .data("/api/bot/detail", &[("id", bot_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(detail.unwrap().bot.terjual, 4);
}

// ============================================================================
// Transaction Tests
// ============================================================================

#[tokio::test]
async fn test_record_sale() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, product_id) = seed_store(&server, 10_000, "").await;

    let response = server
        .get_with(
            "/api/transaction/record-sale",
            &[
                ("botId", bot_id.as_str()),
                ("productCode", product_id.as_str()),
                ("quantity", "2"),
                ("finalPrice", "18000"),
            ],
        )
        .await
        .unwrap();
    let body: Envelope<BotBody> = response.json().await.unwrap();
    assert_eq!(body.message.as_deref(), Some("Sale recorded successfully"));
    assert_eq!(body.data.terjual, 2);
    assert_eq!(body.data.soldtoday, 2);
    assert_eq!(body.data.total_nominal_transaksi, 18_000);
    assert_eq!(body.data.nominaltoday, 18_000);

    let bot: BotBody = server
        .data("/api/bot/reset-today", &[("id", bot_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(bot.soldtoday, 0);
    assert_eq!(bot.terjual, 2);

    let err = server
        .error(
            "/api/transaction/record-sale",
            &[("botId", "-1"), ("productCode", "x"), ("quantity", "1"), ("finalPrice", "1")],
            StatusCode::NOT_FOUND,
        )
        .await
        .unwrap();
    assert_eq!(err.code, "UNKNOWN_BOT");
}

#[tokio::test]
async fn test_purchase_and_history() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, product_id) = seed_store(&server, 10_000, "s1,s2,s3").await;
    let user_id = seed_user(&server, 25_000).await;

    let receipt: PurchaseBody = server
        .data(
            "/api/transaction/purchase",
            &[
                ("botId", bot_id.as_str()),
                ("userId", user_id.as_str()),
                ("productId", product_id.as_str()),
                ("quantity", "2"),
                ("reffId", "INV-1"),
            ],
            StatusCode::CREATED,
        )
        .await
        .unwrap();
    assert_eq!(receipt.accounts, vec!["s1", "s2"]);
    assert_eq!(receipt.remaining_stock, 1);
    assert_eq!(receipt.balance, 5_000);
    assert_eq!(receipt.transaction.total_amount, 20_000);
    assert_eq!(receipt.transaction.snk, "No refunds");
    assert_eq!(receipt.transaction.reff_id, "INV-1");

    // Too poor for the last one: nothing changes
    let err = server
        .error(
            "/api/transaction/purchase",
            &[("botId", bot_id.as_str()), ("userId", user_id.as_str()), ("productId", product_id.as_str())],
            StatusCode::UNPROCESSABLE_ENTITY,
        )
        .await
        .unwrap();
    assert_eq!(err.code, "INSUFFICIENT_BALANCE");

    let history: Vec<TransactionBody> = server
        .data(
            "/api/transaction/user-history",
            &[("userId", user_id.as_str())],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert_eq!(history.len(), 1);
    assert_eq!(history[0].accounts, vec!["s1", "s2"]);

    let user: Option<UserBody> = server
        .data("/api/user/detail", &[("id", user_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    let user = user.unwrap();
    assert_eq!(user.balance, 5_000);
    assert_eq!(user.membeli, 2);
    assert_eq!(user.total_nominal_transaksi, 20_000);
}

#[tokio::test]
async fn test_history_paging() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, product_id) = seed_store(&server, 100, "").await;
    let user_id = seed_user(&server, 0).await;

    for quantity in 1..=3 {
        let _: TransactionBody = server
            .data(
                "/api/transaction/add-history",
                &[
                    ("userId", user_id.as_str()),
                    ("botId", bot_id.as_str()),
                    ("productId", product_id.as_str()),
                    ("productName", "Netflix"),
                    ("quantity", quantity.to_string().as_str()),
                    ("price", "100"),
                ],
                StatusCode::CREATED,
            )
            .await
            .unwrap();
    }

    let page: Vec<TransactionBody> = server
        .data(
            "/api/transaction/bot-history",
            &[("botId", bot_id.as_str()), ("limit", "2"), ("skip", "0")],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert_eq!(page.iter().map(|t| t.quantity).collect::<Vec<_>>(), vec![3, 2]);
    assert_eq!(page[0].status, "completed");
    assert_eq!(page[0].payment_method, "balance");

    let rest: Vec<TransactionBody> = server
        .data(
            "/api/transaction/bot-history",
            &[("botId", bot_id.as_str()), ("limit", "2"), ("skip", "2")],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert_eq!(rest.len(), 1);

    let all: Vec<TransactionBody> = server
        .data("/api/transaction/all", &[("botId", bot_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(all.len(), 3);
}

// ============================================================================
// Stats Tests
// ============================================================================

#[tokio::test]
async fn test_stats_reductions() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, product_id) = seed_store(&server, 500, "").await;
    let user_id = seed_user(&server, 0).await;

    for (quantity, status) in [("2", "completed"), ("5", "pending"), ("1", "completed")] {
        let _: TransactionBody = server
            .data(
                "/api/transaction/add-history",
                &[
                    ("userId", user_id.as_str()),
                    ("botId", bot_id.as_str()),
                    ("productId", product_id.as_str()),
                    ("productName", "Netflix"),
                    ("quantity", quantity),
                    ("price", "500"),
                    ("status", status),
                ],
                StatusCode::CREATED,
            )
            .await
            .unwrap();
    }

    let totals: BotTotalsBody = server
        .data("/api/stats/total-transaction", &[("botId", bot_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(totals.total_pcs, 3);
    assert_eq!(totals.total_pendapatan, 1_500);

    let per_product: Vec<ProductSalesBody> = server
        .data("/api/stats/pcs-per-product", &[("botId", bot_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(per_product.len(), 1);
    assert_eq!(per_product[0].product_id, product_id);
    assert_eq!(per_product[0].total_pcs, 3);

    let units: i64 = server
        .data("/api/stats/pcs-sold-product", &[("productId", product_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(units, 3);

    let today = chrono::Utc::now().format("%Y-%m-%d").to_string();
    let revenue: i64 = server
        .data(
            "/api/stats/revenue-date",
            &[("start", today.as_str()), ("end", today.as_str())],
            StatusCode::OK,
        )
        .await
        .unwrap();
    assert!(revenue >= 1_500);

    let err = server
        .error(
            "/api/stats/revenue-date",
            &[("start", "2024-02-01"), ("end", "2024-01-01")],
            StatusCode::BAD_REQUEST,
        )
        .await
        .unwrap();
    assert_eq!(err.code, "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_dashboards() {
    if !check_test_env().await {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (bot_id, product_id) = seed_store(&server, 1_000, "").await;

    let _: BotBody = server
        .data(
            "/api/stats/add-bot-trx",
            &[("botId", bot_id.as_str()), ("totalTransaksi", "2"), ("totalNominal", "3000")],
            StatusCode::OK,
        )
        .await
        .unwrap();
    let _: BotBody = server
        .data(
            "/api/transaction/record-sale",
            &[("botId", bot_id.as_str()), ("productCode", product_id.as_str()), ("quantity", "1"), ("finalPrice", "1000")],
            StatusCode::OK,
        )
        .await
        .unwrap();

    let admin: AdminStatsBody = server
        .data("/api/stats/admin", &[("botId", bot_id.as_str())], StatusCode::OK)
        .await
        .unwrap();
    assert_eq!(admin.total_products, 1);
    assert_eq!(admin.total_revenue, 4_000);
    assert_eq!(admin.total_products_sold, 1);
    assert_eq!(admin.total_transactions, 0);
    assert!(admin.total_users >= 0);

    let err = server
        .error("/api/stats/public", &[("botId", "-1")], StatusCode::NOT_FOUND)
        .await
        .unwrap();
    assert_eq!(err.code, "UNKNOWN_BOT");
}
