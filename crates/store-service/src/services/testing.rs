//! In-memory repositories for service unit tests

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::Utc;
use sqlx::postgres::PgPoolOptions;

use store_core::entities::{
    Bot, BotCatalog, BotCounterDelta, Category, DateRange, NewTransaction, Product, ProductEdit,
    ProductSales, ProductSummary, Purchase, PurchaseReceipt, Transaction, User, UserCounterDelta,
};
use store_core::traits::{
    BotRepository, CategoryRepository, HistoryQuery, ProductRepository, RepoResult,
    SalesRepository, StatsRepository, TransactionRepository, UserRepository,
};
use store_core::DomainError;

use super::context::{ServiceContext, ServiceContextBuilder};

type ProductKey = (i64, String);

#[derive(Default)]
struct State {
    users: BTreeMap<i64, User>,
    bots: BTreeMap<i64, Bot>,
    products: BTreeMap<ProductKey, Product>,
    categories: BTreeMap<ProductKey, Category>,
    transactions: Vec<Transaction>,
}

impl State {
    fn missing_product(&self, bot_id: i64, product_id: &str) -> DomainError {
        if self.bots.contains_key(&bot_id) {
            DomainError::ProductNotFound {
                bot_id,
                product_id: product_id.to_string(),
            }
        } else {
            DomainError::BotNotFound(bot_id)
        }
    }

    fn product_mut(&mut self, bot_id: i64, product_id: &str) -> RepoResult<&mut Product> {
        let key = (bot_id, product_id.to_string());
        if !self.products.contains_key(&key) {
            return Err(self.missing_product(bot_id, product_id));
        }
        self.products
            .get_mut(&key)
            .ok_or_else(|| DomainError::InternalError("product vanished".to_string()))
    }

    fn user_mut(&mut self, id: i64) -> RepoResult<&mut User> {
        self.users.get_mut(&id).ok_or(DomainError::UserNotFound(id))
    }

    fn bot_mut(&mut self, id: i64) -> RepoResult<&mut Bot> {
        self.bots.get_mut(&id).ok_or(DomainError::BotNotFound(id))
    }

    fn insert_transaction(&mut self, record: &NewTransaction) -> Transaction {
        let transaction = Transaction {
            id: self.transactions.len() as i64 + 1,
            user_id: record.user_id,
            bot_id: record.bot_id,
            product_id: record.product_id.clone(),
            product_name: record.product_name.clone(),
            quantity: record.quantity,
            price: record.price,
            total_amount: record.total_amount(),
            status: record.status.clone(),
            accounts: record.accounts.clone(),
            payment_method: record.payment_method.clone(),
            terms: record.terms.clone(),
            reference_id: record.reference_id.clone(),
            created_at: Utc::now(),
        };
        self.transactions.push(transaction.clone());
        transaction
    }

    fn completed(&self) -> impl Iterator<Item = &Transaction> {
        self.transactions.iter().filter(|t| t.is_completed())
    }

    fn history<F>(&self, query: HistoryQuery, filter: F) -> Vec<Transaction>
    where
        F: Fn(&Transaction) -> bool,
    {
        self.transactions
            .iter()
            .rev()
            .filter(|&t| filter(t))
            .skip(query.skip as usize)
            .take(query.limit as usize)
            .cloned()
            .collect()
    }
}

/// Every repository trait over one shared in-memory state
#[derive(Default)]
pub(crate) struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    fn with<T>(&self, f: impl FnOnce(&mut State) -> T) -> T {
        let mut state = self.state.lock().unwrap();
        f(&mut state)
    }
}

/// A service context backed by a fresh in-memory store.
///
/// The pool is lazy and never connected, so only the health probe would
/// touch it.
pub(crate) fn test_context() -> ServiceContext {
    let store = Arc::new(InMemoryStore::default());
    let pool = PgPoolOptions::new()
        .connect_lazy("postgres://localhost/store_test")
        .unwrap();

    ServiceContextBuilder::new()
        .pool(pool)
        .user_repo(store.clone())
        .bot_repo(store.clone())
        .product_repo(store.clone())
        .category_repo(store.clone())
        .transaction_repo(store.clone())
        .sales_repo(store.clone())
        .stats_repo(store)
        .build()
        .unwrap()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<User>> {
        Ok(self.with(|s| s.users.get(&id).cloned()))
    }

    async fn exists(&self, id: i64) -> RepoResult<bool> {
        Ok(self.with(|s| s.users.contains_key(&id)))
    }

    async fn create(&self, user: &User) -> RepoResult<()> {
        self.with(|s| {
            if s.users.contains_key(&user.id) {
                return Err(DomainError::UserAlreadyExists(user.id));
            }
            s.users.insert(user.id, user.clone());
            Ok(())
        })
    }

    async fn find_all(&self) -> RepoResult<Vec<User>> {
        Ok(self.with(|s| s.users.values().cloned().collect()))
    }

    async fn find_telegram(&self) -> RepoResult<Vec<User>> {
        Ok(self.with(|s| s.users.values().filter(|u| u.is_telegram).cloned().collect()))
    }

    async fn add_balance(&self, id: i64, amount: i64) -> RepoResult<User> {
        self.with(|s| {
            let user = s.user_mut(id)?;
            user.balance += amount;
            Ok(user.clone())
        })
    }

    async fn set_role(&self, id: i64, role: &str) -> RepoResult<User> {
        self.with(|s| {
            let user = s.user_mut(id)?;
            user.role = role.to_string();
            Ok(user.clone())
        })
    }

    async fn set_banned(&self, id: i64, banned: bool) -> RepoResult<User> {
        self.with(|s| {
            let user = s.user_mut(id)?;
            user.banned = banned;
            Ok(user.clone())
        })
    }

    async fn add_counters(&self, id: i64, delta: UserCounterDelta) -> RepoResult<User> {
        self.with(|s| {
            let user = s.user_mut(id)?;
            user.transaction_count += delta.transactions;
            user.purchased_count += delta.purchased;
            user.total_spent += delta.spent;
            Ok(user.clone())
        })
    }

    async fn delete(&self, id: i64) -> RepoResult<()> {
        self.with(|s| {
            s.users
                .remove(&id)
                .map(|_| ())
                .ok_or(DomainError::UserNotFound(id))
        })
    }

    async fn count(&self) -> RepoResult<i64> {
        Ok(self.with(|s| s.users.len() as i64))
    }
}

#[async_trait]
impl BotRepository for InMemoryStore {
    async fn find_by_id(&self, id: i64) -> RepoResult<Option<Bot>> {
        Ok(self.with(|s| s.bots.get(&id).cloned()))
    }

    async fn exists(&self, id: i64) -> RepoResult<bool> {
        Ok(self.with(|s| s.bots.contains_key(&id)))
    }

    async fn create(&self, bot: &Bot) -> RepoResult<()> {
        self.with(|s| {
            if s.bots.contains_key(&bot.id) {
                return Err(DomainError::BotAlreadyExists(bot.id));
            }
            s.bots.insert(bot.id, bot.clone());
            Ok(())
        })
    }

    async fn find_catalog(&self, id: i64) -> RepoResult<Option<BotCatalog>> {
        Ok(self.with(|s| {
            let bot = s.bots.get(&id)?.clone();
            let products = s
                .products
                .values()
                .filter(|p| p.bot_id == id)
                .cloned()
                .collect();
            let categories = s
                .categories
                .values()
                .filter(|c| c.bot_id == id)
                .cloned()
                .collect();
            Some(BotCatalog {
                bot,
                products,
                categories,
            })
        }))
    }

    async fn apply_counters(&self, id: i64, delta: BotCounterDelta) -> RepoResult<Bot> {
        self.with(|s| {
            let bot = s.bot_mut(id)?;
            bot.apply(&delta);
            Ok(bot.clone())
        })
    }

    async fn reset_today(&self, id: i64) -> RepoResult<Bot> {
        self.with(|s| {
            let bot = s.bot_mut(id)?;
            bot.sold_today = 0;
            bot.transactions_today = 0;
            bot.revenue_today = 0;
            Ok(bot.clone())
        })
    }
}

#[async_trait]
impl ProductRepository for InMemoryStore {
    async fn find(&self, bot_id: i64, product_id: &str) -> RepoResult<Option<Product>> {
        Ok(self.with(|s| s.products.get(&(bot_id, product_id.to_string())).cloned()))
    }

    async fn find_by_bot(&self, bot_id: i64) -> RepoResult<Vec<ProductSummary>> {
        Ok(self.with(|s| {
            s.products
                .values()
                .filter(|p| p.bot_id == bot_id)
                .map(ProductSummary::from)
                .collect()
        }))
    }

    async fn create(&self, product: &Product) -> RepoResult<()> {
        self.with(|s| {
            if !s.bots.contains_key(&product.bot_id) {
                return Err(DomainError::BotNotFound(product.bot_id));
            }
            let key = (product.bot_id, product.id.clone());
            if s.products.contains_key(&key) {
                return Err(DomainError::ProductAlreadyExists(product.id.clone()));
            }
            s.products.insert(key, product.clone());
            Ok(())
        })
    }

    async fn update_field(
        &self,
        bot_id: i64,
        product_id: &str,
        edit: ProductEdit,
    ) -> RepoResult<Product> {
        self.with(|s| {
            let stored = s.product_mut(bot_id, product_id)?;
            edit.apply(stored);
            Ok(stored.clone())
        })
    }

    async fn change_id(&self, bot_id: i64, old_id: &str, new_id: &str) -> RepoResult<Product> {
        self.with(|s| {
            s.product_mut(bot_id, old_id)?;
            if s.products.contains_key(&(bot_id, new_id.to_string())) {
                return Err(DomainError::ProductAlreadyExists(new_id.to_string()));
            }
            let mut product = s
                .products
                .remove(&(bot_id, old_id.to_string()))
                .ok_or_else(|| s.missing_product(bot_id, old_id))?;
            product.id = new_id.to_string();
            s.products.insert((bot_id, new_id.to_string()), product.clone());

            for category in s.categories.values_mut().filter(|c| c.bot_id == bot_id) {
                for id in &mut category.product_ids {
                    if id == old_id {
                        *id = new_id.to_string();
                    }
                }
            }
            Ok(product)
        })
    }

    async fn delete(&self, bot_id: i64, product_id: &str) -> RepoResult<()> {
        self.with(|s| {
            s.products
                .remove(&(bot_id, product_id.to_string()))
                .map(|_| ())
                .ok_or_else(|| s.missing_product(bot_id, product_id))
        })
    }

    async fn add_accounts(&self, bot_id: i64, product_id: &str, accounts: &[String])
        -> RepoResult<i64> {
        self.with(|s| {
            let product = s.product_mut(bot_id, product_id)?;
            product.add_accounts(accounts.iter().cloned());
            Ok(product.stock() as i64)
        })
    }

    async fn peek_accounts(&self, bot_id: i64, product_id: &str, limit: i64)
        -> RepoResult<Vec<String>> {
        self.with(|s| {
            let product = s.product_mut(bot_id, product_id)?;
            Ok(product.peek_accounts(limit.max(0) as usize).to_vec())
        })
    }

    async fn take_accounts(&self, bot_id: i64, product_id: &str, quantity: i64)
        -> RepoResult<Vec<String>> {
        if quantity < 1 {
            return Err(DomainError::ValidationError(
                "Quantity must be at least 1".to_string(),
            ));
        }
        self.with(|s| s.product_mut(bot_id, product_id)?.take_accounts(quantity as usize))
    }

    async fn add_sold(&self, bot_id: i64, product_id: &str, quantity: i64) -> RepoResult<Product> {
        self.with(|s| {
            let product = {
                let product = s.product_mut(bot_id, product_id)?;
                product.sold += quantity;
                product.clone()
            };
            s.bot_mut(bot_id)?.apply(&BotCounterDelta::sold(quantity));
            Ok(product)
        })
    }

    async fn count_by_bot(&self, bot_id: i64) -> RepoResult<i64> {
        Ok(self.with(|s| s.products.values().filter(|p| p.bot_id == bot_id).count() as i64))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn find_by_bot(&self, bot_id: i64) -> RepoResult<Vec<Category>> {
        Ok(self.with(|s| {
            s.categories
                .values()
                .filter(|c| c.bot_id == bot_id)
                .cloned()
                .collect()
        }))
    }

    async fn find(&self, bot_id: i64, name: &str) -> RepoResult<Option<Category>> {
        Ok(self.with(|s| s.categories.get(&(bot_id, name.to_string())).cloned()))
    }

    async fn create(&self, category: &Category) -> RepoResult<()> {
        self.with(|s| {
            if !s.bots.contains_key(&category.bot_id) {
                return Err(DomainError::BotNotFound(category.bot_id));
            }
            let key = (category.bot_id, category.name.clone());
            if s.categories.contains_key(&key) {
                return Err(DomainError::CategoryAlreadyExists(category.name.clone()));
            }
            s.categories.insert(key, category.clone());
            Ok(())
        })
    }

    async fn replace(&self, bot_id: i64, name: &str, product_ids: &[String])
        -> RepoResult<Category> {
        self.with(|s| {
            let category = s
                .categories
                .get_mut(&(bot_id, name.to_string()))
                .ok_or_else(|| DomainError::CategoryNotFound {
                    bot_id,
                    name: name.to_string(),
                })?;
            category.product_ids = product_ids.to_vec();
            Ok(category.clone())
        })
    }

    async fn append(&self, bot_id: i64, name: &str, product_ids: &[String])
        -> RepoResult<Category> {
        self.with(|s| {
            let category = s
                .categories
                .get_mut(&(bot_id, name.to_string()))
                .ok_or_else(|| DomainError::CategoryNotFound {
                    bot_id,
                    name: name.to_string(),
                })?;
            category.append(product_ids.iter().cloned());
            Ok(category.clone())
        })
    }

    async fn delete(&self, bot_id: i64, name: &str) -> RepoResult<()> {
        self.with(|s| {
            s.categories
                .remove(&(bot_id, name.to_string()))
                .map(|_| ())
                .ok_or_else(|| DomainError::CategoryNotFound {
                    bot_id,
                    name: name.to_string(),
                })
        })
    }
}

#[async_trait]
impl TransactionRepository for InMemoryStore {
    async fn create(&self, transaction: &NewTransaction) -> RepoResult<Transaction> {
        Ok(self.with(|s| s.insert_transaction(transaction)))
    }

    async fn find_by_user(&self, user_id: i64, query: HistoryQuery)
        -> RepoResult<Vec<Transaction>> {
        Ok(self.with(|s| s.history(query, |t| t.user_id == user_id)))
    }

    async fn find_by_bot(&self, bot_id: i64, query: HistoryQuery) -> RepoResult<Vec<Transaction>> {
        Ok(self.with(|s| s.history(query, |t| t.bot_id == bot_id)))
    }

    async fn count_by_bot(&self, bot_id: i64) -> RepoResult<i64> {
        Ok(self.with(|s| s.transactions.iter().filter(|t| t.bot_id == bot_id).count() as i64))
    }
}

#[async_trait]
impl SalesRepository for InMemoryStore {
    async fn record_sale(
        &self,
        bot_id: i64,
        product_id: &str,
        quantity: i64,
        final_price: i64,
    ) -> RepoResult<Bot> {
        self.with(|s| {
            let bot = {
                let bot = s.bot_mut(bot_id)?;
                bot.apply(&BotCounterDelta::sale(quantity, final_price));
                bot.clone()
            };
            if let Some(product) = s.products.get_mut(&(bot_id, product_id.to_string())) {
                product.sold += quantity;
            }
            Ok(bot)
        })
    }

    async fn purchase(&self, purchase: &Purchase) -> RepoResult<PurchaseReceipt> {
        purchase.validate()?;
        self.with(|s| {
            // Validate everything on copies before mutating
            let mut product = s.product_mut(purchase.bot_id, &purchase.product_id)?.clone();
            let user = s.user_mut(purchase.user_id)?.clone();

            let total = product.total_for(purchase.quantity);
            let debit = if purchase.pays_with_balance() { total } else { 0 };
            user.ensure_can_spend(debit)?;
            let accounts = product.take_accounts(purchase.quantity as usize)?;
            product.sold += purchase.quantity;

            let remaining_stock = product.stock() as i64;
            let record = NewTransaction {
                quantity: purchase.quantity,
                accounts,
                payment_method: purchase.payment_method.clone(),
                terms: product.terms.clone(),
                reference_id: purchase.reference_id.clone(),
                ..NewTransaction::new(
                    purchase.user_id,
                    purchase.bot_id,
                    product.id.clone(),
                    product.name.clone(),
                    product.price,
                )
            };

            s.products
                .insert((purchase.bot_id, purchase.product_id.clone()), product);
            s.bot_mut(purchase.bot_id)?
                .apply(&BotCounterDelta::purchase(purchase.quantity, total));
            let user = s.user_mut(purchase.user_id)?;
            user.balance -= debit;
            user.transaction_count += 1;
            user.purchased_count += purchase.quantity;
            user.total_spent += total;
            let balance = user.balance;

            let transaction = s.insert_transaction(&record);
            Ok(PurchaseReceipt {
                transaction,
                remaining_stock,
                balance,
            })
        })
    }
}

#[async_trait]
impl StatsRepository for InMemoryStore {
    async fn sales_per_product(&self, bot_id: Option<i64>) -> RepoResult<Vec<ProductSales>> {
        Ok(self.with(|s| {
            let mut groups: Vec<ProductSales> = Vec::new();
            for t in s.completed().filter(|t| bot_id.is_none_or(|id| t.bot_id == id)) {
                match groups.iter_mut().find(|g| g.product_id == t.product_id) {
                    Some(group) => {
                        group.total_units += t.quantity;
                        group.total_revenue += t.total_amount;
                    }
                    None => groups.push(ProductSales {
                        product_id: t.product_id.clone(),
                        product_name: t.product_name.clone(),
                        total_units: t.quantity,
                        total_revenue: t.total_amount,
                    }),
                }
            }
            groups.sort_by(|a, b| {
                b.total_units
                    .cmp(&a.total_units)
                    .then_with(|| a.product_id.cmp(&b.product_id))
            });
            groups
        }))
    }

    async fn total_revenue(&self) -> RepoResult<i64> {
        Ok(self.with(|s| s.completed().map(|t| t.total_amount).sum()))
    }

    async fn revenue_between(&self, range: DateRange) -> RepoResult<i64> {
        Ok(self.with(|s| {
            s.completed()
                .filter(|t| range.contains(t.created_at))
                .map(|t| t.total_amount)
                .sum()
        }))
    }

    async fn total_units(&self) -> RepoResult<i64> {
        Ok(self.with(|s| s.completed().map(|t| t.quantity).sum()))
    }

    async fn units_for_product(&self, product_id: &str) -> RepoResult<i64> {
        Ok(self.with(|s| {
            s.completed()
                .filter(|t| t.product_id == product_id)
                .map(|t| t.quantity)
                .sum()
        }))
    }
}
