//! Shared test fixtures: an in-memory Unit of Work.

#![allow(dead_code)]

use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use url::Url;

use domain::{
    NewShop, NewUser, Password, Product, ProductColor, ProductData, ProductImage, Shop, User,
    UserChanges,
};
use dream_space::errors::{AppError, AppResult};
use dream_space::infra::{ProductRepository, ShopRepository, UnitOfWork, UserRepository};
use dream_space::RequestContext;

pub const TEST_SECRET: &str = "integration-test-secret-at-least-32-chars";

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: BTreeMap<i64, User>,
    shops: BTreeMap<i64, Shop>,
    products: BTreeMap<i64, Product>,
    images: Vec<ProductImage>,
    colors: Vec<ProductColor>,
    user_shops: BTreeSet<(i64, i64)>,
    favorites: BTreeSet<(i64, i64)>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }

    fn replace_colors(&mut self, product_id: i64, colors: Vec<String>) {
        self.colors.retain(|c| c.product_id != product_id);
        for color in colors {
            let id = self.next_id();
            self.colors.push(ProductColor {
                id,
                product_id,
                color,
            });
        }
    }
}

/// Repositories over shared in-memory tables.
#[derive(Clone, Default)]
pub struct MemoryRepo {
    tables: Arc<Mutex<Tables>>,
}

impl MemoryRepo {
    fn lock(&self) -> MutexGuard<'_, Tables> {
        self.tables.lock().unwrap()
    }
}

#[async_trait]
impl UserRepository for MemoryRepo {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        Ok(self.lock().users.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        Ok(self.lock().users.values().find(|u| u.email == email).cloned())
    }

    async fn create(&self, new_user: NewUser) -> AppResult<User> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let user = User {
            id,
            email: new_user.email,
            username: new_user.username,
            first_name: new_user.first_name,
            last_name: new_user.last_name,
            password_hash: new_user.password_hash,
            is_superuser: false,
            is_staff: false,
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        };
        tables.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i64, changes: UserChanges) -> AppResult<User> {
        let mut tables = self.lock();
        let user = tables
            .users
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("User with id '{}' not found.", id)))?;

        if let Some(email) = changes.email {
            user.email = email;
        }
        if let Some(first_name) = changes.first_name {
            user.first_name = first_name;
        }
        if let Some(last_name) = changes.last_name {
            user.last_name = last_name;
        }
        let updated = user.clone();

        if let Some(shops) = changes.shops {
            tables.user_shops.retain(|(user_id, _)| *user_id != id);
            tables.user_shops.extend(shops.into_iter().map(|shop| (id, shop)));
        }
        if let Some(favorites) = changes.favorites {
            tables.favorites.retain(|(user_id, _)| *user_id != id);
            tables.favorites.extend(favorites.into_iter().map(|product| (id, product)));
        }

        Ok(updated)
    }

    async fn shops(&self, id: i64) -> AppResult<Vec<Shop>> {
        let tables = self.lock();
        Ok(tables
            .user_shops
            .iter()
            .filter(|(user_id, _)| *user_id == id)
            .filter_map(|(_, shop_id)| tables.shops.get(shop_id).cloned())
            .collect())
    }

    async fn favorite_ids(&self, id: i64) -> AppResult<Vec<i64>> {
        Ok(self
            .lock()
            .favorites
            .iter()
            .filter(|(user_id, _)| *user_id == id)
            .map(|(_, product_id)| *product_id)
            .collect())
    }

    async fn record_login(&self, id: i64) -> AppResult<()> {
        if let Some(user) = self.lock().users.get_mut(&id) {
            user.last_login = Some(Utc::now());
        }
        Ok(())
    }
}

#[async_trait]
impl ShopRepository for MemoryRepo {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Shop>> {
        Ok(self.lock().shops.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Shop>> {
        Ok(self.lock().shops.values().cloned().collect())
    }

    async fn existing_ids(&self, ids: Vec<i64>) -> AppResult<Vec<i64>> {
        let tables = self.lock();
        Ok(ids.into_iter().filter(|id| tables.shops.contains_key(id)).collect())
    }

    async fn create_for_user(&self, user_id: i64, new_shop: NewShop) -> AppResult<Shop> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let shop = Shop {
            id,
            name: new_shop.name,
            logo: new_shop.logo,
        };
        tables.shops.insert(id, shop.clone());
        tables.user_shops.insert((user_id, id));
        Ok(shop)
    }
}

#[async_trait]
impl ProductRepository for MemoryRepo {
    async fn find_by_id(&self, id: i64) -> AppResult<Option<Product>> {
        Ok(self.lock().products.get(&id).cloned())
    }

    async fn list(&self) -> AppResult<Vec<Product>> {
        Ok(self.lock().products.values().cloned().collect())
    }

    async fn existing_ids(&self, ids: Vec<i64>) -> AppResult<Vec<i64>> {
        let tables = self.lock();
        Ok(ids
            .into_iter()
            .filter(|id| tables.products.contains_key(id))
            .collect())
    }

    async fn images(&self, product_id: i64) -> AppResult<Vec<ProductImage>> {
        Ok(self
            .lock()
            .images
            .iter()
            .filter(|i| i.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn colors(&self, product_id: i64) -> AppResult<Vec<ProductColor>> {
        Ok(self
            .lock()
            .colors
            .iter()
            .filter(|c| c.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn create(&self, data: ProductData, colors: Option<Vec<String>>) -> AppResult<Product> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let product = Product {
            id,
            name: data.name,
            price: data.price,
            category: data.category,
            shop_id: data.shop_id,
        };
        tables.products.insert(id, product.clone());
        if let Some(colors) = colors {
            tables.replace_colors(id, colors);
        }
        Ok(product)
    }

    async fn update(
        &self,
        id: i64,
        data: ProductData,
        colors: Option<Vec<String>>,
    ) -> AppResult<Product> {
        let mut tables = self.lock();
        let product = tables
            .products
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Product with id '{}' not found.", id)))?;
        product.name = data.name;
        product.price = data.price;
        product.category = data.category;
        product.shop_id = data.shop_id;
        let updated = product.clone();

        if let Some(colors) = colors {
            tables.replace_colors(id, colors);
        }
        Ok(updated)
    }

    async fn delete(&self, id: i64) -> AppResult<()> {
        let mut tables = self.lock();
        if tables.products.remove(&id).is_none() {
            return Err(AppError::not_found(format!("Product with id '{}' not found.", id)));
        }
        tables.images.retain(|i| i.product_id != id);
        tables.colors.retain(|c| c.product_id != id);
        tables.favorites.retain(|(_, product_id)| *product_id != id);
        Ok(())
    }

    async fn add_image(&self, product_id: i64, image: Option<String>) -> AppResult<ProductImage> {
        let mut tables = self.lock();
        let id = tables.next_id();
        let image = ProductImage {
            id,
            product_id,
            image,
        };
        tables.images.push(image.clone());
        Ok(image)
    }
}

/// In-memory Unit of Work with seeding helpers.
#[derive(Clone, Default)]
pub struct MemoryStore {
    repo: MemoryRepo,
}

#[async_trait]
impl UnitOfWork for MemoryStore {
    fn users(&self) -> Arc<dyn UserRepository> {
        Arc::new(self.repo.clone())
    }

    fn shops(&self) -> Arc<dyn ShopRepository> {
        Arc::new(self.repo.clone())
    }

    fn products(&self) -> Arc<dyn ProductRepository> {
        Arc::new(self.repo.clone())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seed_user(&self, email: &str, password: &str) -> User {
        let mut tables = self.repo.lock();
        let id = tables.next_id();
        let user = User {
            id,
            email: email.to_string(),
            username: email.to_string(),
            first_name: "Test".to_string(),
            last_name: "User".to_string(),
            password_hash: Password::new(password).unwrap().into_string(),
            is_superuser: false,
            is_staff: false,
            is_active: true,
            date_joined: Utc::now(),
            last_login: None,
        };
        tables.users.insert(id, user.clone());
        user
    }

    pub fn seed_shop(&self, name: &str, logo: Option<&str>) -> Shop {
        let mut tables = self.repo.lock();
        let id = tables.next_id();
        let shop = Shop {
            id,
            name: name.to_string(),
            logo: logo.map(str::to_string),
        };
        tables.shops.insert(id, shop.clone());
        shop
    }

    pub fn seed_product(&self, name: &str, price: &str, shop_id: i64, colors: &[&str]) -> Product {
        let mut tables = self.repo.lock();
        let id = tables.next_id();
        let product = Product {
            id,
            name: name.to_string(),
            price: Decimal::from_str(price).unwrap(),
            category: "general".to_string(),
            shop_id,
        };
        tables.products.insert(id, product.clone());
        tables.replace_colors(id, colors.iter().map(|c| c.to_string()).collect());
        product
    }

    pub fn seed_image(&self, product_id: i64, image: Option<&str>) -> ProductImage {
        let mut tables = self.repo.lock();
        let id = tables.next_id();
        let image = ProductImage {
            id,
            product_id,
            image: image.map(str::to_string),
        };
        tables.images.push(image.clone());
        image
    }

    /// Remove a shop without touching its products, leaving them dangling.
    pub fn drop_shop(&self, shop_id: i64) {
        let mut tables = self.repo.lock();
        tables.shops.remove(&shop_id);
        tables.user_shops.retain(|(_, id)| *id != shop_id);
    }

    pub fn user_shop_ids(&self, user_id: i64) -> Vec<i64> {
        self.repo
            .lock()
            .user_shops
            .iter()
            .filter(|(id, _)| *id == user_id)
            .map(|(_, shop_id)| *shop_id)
            .collect()
    }

    pub fn shop_count(&self) -> usize {
        self.repo.lock().shops.len()
    }

    pub fn color_labels(&self, product_id: i64) -> BTreeSet<String> {
        self.repo
            .lock()
            .colors
            .iter()
            .filter(|c| c.product_id == product_id)
            .map(|c| c.color.clone())
            .collect()
    }

    pub fn image_count(&self, product_id: i64) -> usize {
        self.repo
            .lock()
            .images
            .iter()
            .filter(|i| i.product_id == product_id)
            .count()
    }
}

pub fn context() -> RequestContext {
    RequestContext::new(Url::parse("http://testserver").unwrap(), "/media/")
}
