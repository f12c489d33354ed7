//! In-memory data stores for principals and the demo catalog.
//!
//! These are the collaborators the authorization core protects. The
//! storefront's real persistence layer is a relational database; the
//! in-process maps here keep the same contracts (unique usernames,
//! wholesale credential replacement, stock decrement) without dragging a
//! database into the authorization core's test surface.

use std::collections::HashMap;
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::auth::session::Role;

/// An authenticated actor. Created at signup, referenced by ID everywhere
/// else, immutable except via explicit profile update.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Principal {
    pub id: String,
    pub username: String,
    pub display_name: String,
    pub role: Role,
}

struct PrincipalRecord {
    principal: Principal,
    /// Salted bcrypt hash; never read back as plaintext.
    password_hash: String,
}

#[derive(Debug, Error, PartialEq)]
pub enum StoreError {
    #[error("username already taken")]
    DuplicateUsername,
    #[error("record not found")]
    NotFound,
    #[error("product out of stock")]
    OutOfStock,
}

/// Process-local principal/credential store.
#[derive(Default)]
pub struct PrincipalStore {
    records: Mutex<HashMap<String, PrincipalRecord>>,
}

impl PrincipalStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a principal with its credential. Fails on duplicate
    /// username.
    pub fn create(
        &self,
        id: String,
        username: &str,
        display_name: &str,
        role: Role,
        password_hash: String,
    ) -> Result<Principal, StoreError> {
        let mut records = self.records.lock().expect("principal store mutex poisoned");

        if records.values().any(|r| r.principal.username == username) {
            return Err(StoreError::DuplicateUsername);
        }

        let principal = Principal {
            id: id.clone(),
            username: username.to_string(),
            display_name: display_name.to_string(),
            role,
        };
        records.insert(
            id,
            PrincipalRecord {
                principal: principal.clone(),
                password_hash,
            },
        );
        Ok(principal)
    }

    /// Look up a principal and its stored hash for a login attempt.
    pub fn find_by_username(&self, username: &str) -> Option<(Principal, String)> {
        let records = self.records.lock().expect("principal store mutex poisoned");
        records
            .values()
            .find(|r| r.principal.username == username)
            .map(|r| (r.principal.clone(), r.password_hash.clone()))
    }

    pub fn get(&self, id: &str) -> Option<Principal> {
        let records = self.records.lock().expect("principal store mutex poisoned");
        records.get(id).map(|r| r.principal.clone())
    }

    /// Profile update: display name only.
    pub fn update_display_name(&self, id: &str, display_name: &str) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("principal store mutex poisoned");
        let record = records.get_mut(id).ok_or(StoreError::NotFound)?;
        record.principal.display_name = display_name.to_string();
        Ok(())
    }

    /// Password change replaces the stored hash wholesale.
    pub fn replace_credential(&self, id: &str, password_hash: String) -> Result<(), StoreError> {
        let mut records = self.records.lock().expect("principal store mutex poisoned");
        let record = records.get_mut(id).ok_or(StoreError::NotFound)?;
        record.password_hash = password_hash;
        Ok(())
    }
}

/// A catalog item.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    pub price_cents: u64,
    pub stock: u32,
}

/// Process-local product catalog.
#[derive(Default)]
pub struct CatalogStore {
    products: Mutex<HashMap<String, Product>>,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, name: &str, price_cents: u64, stock: u32) -> Product {
        let product = Product {
            id: Uuid::new_v4().to_string(),
            name: name.to_string(),
            price_cents,
            stock,
        };
        self.products
            .lock()
            .expect("catalog mutex poisoned")
            .insert(product.id.clone(), product.clone());
        product
    }

    pub fn list(&self) -> Vec<Product> {
        let mut products: Vec<Product> = self
            .products
            .lock()
            .expect("catalog mutex poisoned")
            .values()
            .cloned()
            .collect();
        products.sort_by(|a, b| a.name.cmp(&b.name));
        products
    }

    /// Purchase one unit, decrementing stock.
    pub fn buy(&self, product_id: &str) -> Result<Product, StoreError> {
        let mut products = self.products.lock().expect("catalog mutex poisoned");
        let product = products.get_mut(product_id).ok_or(StoreError::NotFound)?;
        if product.stock == 0 {
            return Err(StoreError::OutOfStock);
        }
        product.stock -= 1;
        Ok(product.clone())
    }
}
