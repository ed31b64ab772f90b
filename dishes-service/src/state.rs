//! 目录存储 - 内存实现
//!
//! 分类和菜品两个表，菜品通过 category_id 关联分类。
//! 读接口把关联展开成 [`shared::Dish`] 的嵌套形状。

use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::RwLock;
use rust_decimal::Decimal;
use shared::{Category, CategoryRef, Dish};

pub struct AppState {
    pub catalog: CatalogStore,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            catalog: CatalogStore::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct DishRecord {
    id: i64,
    name: String,
    price: Decimal,
    category_id: Option<i64>,
}

pub struct CatalogStore {
    categories: RwLock<Vec<Category>>,
    dishes: RwLock<Vec<DishRecord>>,
    next_category_id: AtomicI64,
    next_dish_id: AtomicI64,
}

impl CatalogStore {
    pub fn new() -> Self {
        Self {
            categories: RwLock::new(Vec::new()),
            dishes: RwLock::new(Vec::new()),
            next_category_id: AtomicI64::new(1),
            next_dish_id: AtomicI64::new(1),
        }
    }

    /// 灌入示例法餐菜单
    pub fn seed(&self) {
        if !self.categories.read().is_empty() || !self.dishes.read().is_empty() {
            return;
        }
        self.create_category("Entrées");
        let plats = self.create_category("Plats");
        let desserts = self.create_category("Desserts");
        self.insert_dish("Salade niçoise", Decimal::new(85, 1), Some(plats.id));
        self.insert_dish("Steak frites", Decimal::new(140, 1), Some(plats.id));
        self.insert_dish("Crème brûlée", Decimal::new(60, 1), Some(desserts.id));
    }

    pub fn list_categories(&self) -> Vec<Category> {
        self.categories.read().clone()
    }

    fn create_category(&self, name: &str) -> Category {
        let category = Category {
            id: self.next_category_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
        };
        self.categories.write().push(category.clone());
        category
    }

    fn category_by_id(&self, id: i64) -> Option<Category> {
        self.categories.read().iter().find(|c| c.id == id).cloned()
    }

    fn category_by_name(&self, name: &str) -> Option<Category> {
        self.categories.read().iter().find(|c| c.name == name).cloned()
    }

    /// 按分类过滤菜品：数字串按 id 解析，否则按名称
    pub fn list_dishes(&self, category: Option<&str>) -> Vec<Dish> {
        let filter_id: Option<i64> = match category {
            None | Some("") => None,
            Some(raw) => match raw.parse::<i64>() {
                Ok(id) => Some(id),
                // 名称不存在时过滤结果为空，而不是忽略过滤条件
                Err(_) => Some(
                    self.category_by_name(raw)
                        .map(|c| c.id)
                        .unwrap_or(i64::MIN),
                ),
            },
        };

        self.dishes
            .read()
            .iter()
            .filter(|d| match filter_id {
                None => true,
                Some(id) => d.category_id == Some(id),
            })
            .map(|d| self.expand(d))
            .collect()
    }

    pub fn get_dish(&self, id: i64) -> Option<Dish> {
        self.dishes
            .read()
            .iter()
            .find(|d| d.id == id)
            .map(|d| self.expand(d))
    }

    /// 创建菜品；分类接受 id 或名称，名称不存在时自动创建
    ///
    /// 给了 id 但分类不存在时，菜品落在 "无分类"。
    pub fn create_dish(&self, name: &str, price: Decimal, category: Option<CategoryRef>) -> Dish {
        let category_id = category.and_then(|r| match r {
            CategoryRef::Id(id) => self.category_by_id(id).map(|c| c.id),
            CategoryRef::Name(raw) => {
                // 纯数字的字符串按 id 处理
                if let Ok(id) = raw.parse::<i64>() {
                    self.category_by_id(id).map(|c| c.id)
                } else {
                    Some(
                        self.category_by_name(&raw)
                            .unwrap_or_else(|| self.create_category(&raw))
                            .id,
                    )
                }
            }
        });

        let record = DishRecord {
            id: self.next_dish_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
            price,
            category_id,
        };
        let dish = self.expand(&record);
        self.dishes.write().push(record);
        dish
    }

    fn expand(&self, record: &DishRecord) -> Dish {
        Dish {
            id: record.id,
            name: record.name.clone(),
            price: record.price,
            category: record.category_id.and_then(|id| self.category_by_id(id)),
        }
    }

    /// 插入菜品，不经过分类解析 (seed 专用)
    fn insert_dish(&self, name: &str, price: Decimal, category_id: Option<i64>) {
        self.dishes.write().push(DishRecord {
            id: self.next_dish_id.fetch_add(1, Ordering::SeqCst),
            name: name.to_string(),
            price,
            category_id,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_seed_is_idempotent() {
        let store = CatalogStore::new();
        store.seed();
        store.seed();
        assert_eq!(store.list_categories().len(), 3);
        assert_eq!(store.list_dishes(None).len(), 3);
    }

    #[test]
    fn test_filter_by_id_and_name() {
        let store = CatalogStore::new();
        store.seed();

        let desserts_by_name = store.list_dishes(Some("Desserts"));
        assert_eq!(desserts_by_name.len(), 1);
        assert_eq!(desserts_by_name[0].name, "Crème brûlée");

        let id = desserts_by_name[0].category.as_ref().unwrap().id;
        let desserts_by_id = store.list_dishes(Some(&id.to_string()));
        assert_eq!(desserts_by_id.len(), 1);
    }

    #[test]
    fn test_filter_unknown_category_is_empty() {
        let store = CatalogStore::new();
        store.seed();
        assert!(store.list_dishes(Some("Nonexistent")).is_empty());
    }

    #[test]
    fn test_create_dish_with_new_category_name() {
        let store = CatalogStore::new();
        let dish = store.create_dish(
            "Tarte tatin",
            Decimal::new(75, 1),
            Some(CategoryRef::Name("Desserts".into())),
        );
        assert_eq!(dish.category.as_ref().unwrap().name, "Desserts");
        // 分类被自动创建
        assert_eq!(store.list_categories().len(), 1);
    }

    #[test]
    fn test_create_dish_with_unknown_category_id() {
        let store = CatalogStore::new();
        let dish = store.create_dish("Soupe", Decimal::new(50, 1), Some(CategoryRef::Id(99)));
        assert!(dish.category.is_none());
    }
}
