// ==========================================
// 履约失败分析 - 订单领域模型
// ==========================================
// 数据流: RawRow（16 列定位） → FailureRow（保留 6 列） → OrderBook
// 用途: 导入层写入, 查询层只读
// ==========================================

use serde::Serialize;
use std::collections::HashMap;

// ==========================================
// 源表列定义（按位置, 表头被丢弃并替换）
// ==========================================
pub const RAW_COLUMN_COUNT: usize = 16;

pub const RAW_COLUMN_NAMES: [&str; RAW_COLUMN_COUNT] = [
    "Id",
    "Order Number",
    "Country",
    "State",
    "City",
    "Line1",
    "Line2",
    "Postal Code",
    "Customer Name",
    "Order Date",
    "Sku",
    "Quantity",
    "Barcode",
    "Fail Code",
    "Fail Detail",
    "Unused",
];

/// 列位置（0-based）
pub mod column {
    pub const ID: usize = 0;
    pub const ORDER_NUMBER: usize = 1;
    pub const COUNTRY: usize = 2;
    pub const STATE: usize = 3;
    pub const CITY: usize = 4;
    pub const LINE1: usize = 5;
    pub const LINE2: usize = 6;
    pub const POSTAL_CODE: usize = 7;
    pub const CUSTOMER_NAME: usize = 8;
    pub const ORDER_DATE: usize = 9;
    pub const SKU: usize = 10;
    pub const QUANTITY: usize = 11;
    pub const BARCODE: usize = 12;
    pub const FAIL_CODE: usize = 13;
    pub const FAIL_DETAIL: usize = 14;
    pub const UNUSED: usize = 15;
}

// ==========================================
// RawRow - 源文件中的一行（一次履约尝试中的一个订单行）
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RawRow {
    pub id: String,
    pub order_number: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub line1: String,
    pub line2: String,
    pub postal_code: String,
    pub customer_name: String,
    pub order_date: String,
    pub sku: String,
    pub quantity: String,
    pub barcode: String,
    pub fail_code: String,
    pub fail_detail: String,
    pub unused: String,

    // 元信息
    pub line_number: usize, // 源文件行号（1-based, 含表头）
}

impl RawRow {
    /// 按位置构造, 不足 16 列时以空串补齐, 多余的列被忽略
    pub fn from_fields<I, S>(fields: I, line_number: usize) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut values: Vec<String> = fields
            .into_iter()
            .take(RAW_COLUMN_COUNT)
            .map(Into::into)
            .collect();
        values.resize(RAW_COLUMN_COUNT, String::new());

        let mut it = values.into_iter();
        let mut next = || it.next().unwrap_or_default();

        Self {
            id: next(),
            order_number: next(),
            country: next(),
            state: next(),
            city: next(),
            line1: next(),
            line2: next(),
            postal_code: next(),
            customer_name: next(),
            order_date: next(),
            sku: next(),
            quantity: next(),
            barcode: next(),
            fail_code: next(),
            fail_detail: next(),
            unused: next(),
            line_number,
        }
    }

    /// 列选择: 只保留核心逻辑需要的字段
    pub fn into_failure_row(self) -> FailureRow {
        FailureRow {
            order_number: self.order_number,
            country: self.country,
            sku: self.sku,
            quantity: self.quantity,
            fail_code: self.fail_code,
            fail_detail: self.fail_detail,
            line_number: self.line_number,
        }
    }
}

// ==========================================
// FailureRow - 列选择后的中间结构体
// ==========================================
// 生命周期: 仅在导入流程内
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FailureRow {
    pub order_number: String, // 原样保留, 不做格式化
    pub country: String,
    pub sku: String,
    pub quantity: String, // 聚合时再解析
    pub fail_code: String,
    pub fail_detail: String,
    pub line_number: usize,
}

// ==========================================
// ItemStatus - 订单内单个 SKU 的数量与可用性
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ItemStatus {
    pub quantity: u64,
    pub available: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ItemLine {
    pub sku: String,
    #[serde(flatten)]
    pub status: ItemStatus,
}

// ==========================================
// OrderRecord - 一个订单号下全部行的聚合视图
// ==========================================
// 不变量: 至少包含一个 SKU; available 只会由 true 翻为 false
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OrderRecord {
    order_id: String,
    country: String, // 首次出现的行决定, 后续行不覆盖
    items: Vec<ItemLine>,
    #[serde(skip)]
    item_index: HashMap<String, usize>, // SKU → items 下标
}

impl OrderRecord {
    pub(crate) fn new(order_id: impl Into<String>, country: impl Into<String>) -> Self {
        Self {
            order_id: order_id.into(),
            country: country.into(),
            items: Vec::new(),
            item_index: HashMap::new(),
        }
    }

    pub fn order_id(&self) -> &str {
        &self.order_id
    }

    pub fn country(&self) -> &str {
        &self.country
    }

    /// 按首次插入顺序返回全部 SKU 行
    pub fn items(&self) -> &[ItemLine] {
        &self.items
    }

    pub fn item(&self, sku: &str) -> Option<&ItemStatus> {
        self.item_index.get(sku).map(|&pos| &self.items[pos].status)
    }

    pub fn contains_sku(&self, sku: &str) -> bool {
        self.item_index.contains_key(sku)
    }

    /// 写入/覆盖 SKU 行（last-write-wins, 可用性重置为 true, 位置保持不变）
    pub(crate) fn upsert_item(&mut self, sku: &str, quantity: u64) {
        let status = ItemStatus {
            quantity,
            available: true,
        };
        match self.item_index.get(sku) {
            Some(&pos) => self.items[pos].status = status,
            None => {
                self.item_index.insert(sku.to_string(), self.items.len());
                self.items.push(ItemLine {
                    sku: sku.to_string(),
                    status,
                });
            }
        }
    }

    /// 标记缺货; SKU 不在订单内时返回 false 且不创建占位行
    pub(crate) fn mark_unavailable(&mut self, sku: &str) -> bool {
        match self.item_index.get(sku) {
            Some(&pos) => {
                self.items[pos].status.available = false;
                true
            }
            None => false,
        }
    }

    /// 全部 SKU 可用（空订单视为全部可用）
    pub fn is_all_available(&self) -> bool {
        self.items.iter().all(|line| line.status.available)
    }

    /// 至少一个 SKU 缺货
    pub fn has_failure(&self) -> bool {
        self.items.iter().any(|line| !line.status.available)
    }

    pub fn skus(&self) -> impl Iterator<Item = &str> {
        self.items.iter().map(|line| line.sku.as_str())
    }

    pub fn unavailable_items(&self) -> impl Iterator<Item = &ItemLine> {
        self.items.iter().filter(|line| !line.status.available)
    }
}

// ==========================================
// OrderBook - 订单号 → OrderRecord（保持首次出现顺序）
// ==========================================
#[derive(Debug, Clone, Default, Serialize)]
pub struct OrderBook {
    orders: Vec<OrderRecord>,
    #[serde(skip)]
    index: HashMap<String, usize>,
}

impl OrderBook {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.orders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.orders.is_empty()
    }

    pub fn get(&self, order_id: &str) -> Option<&OrderRecord> {
        self.index.get(order_id).map(|&pos| &self.orders[pos])
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OrderRecord> {
        self.orders.iter()
    }

    /// 查找或创建订单; 仅在创建时使用传入的国家
    pub(crate) fn entry(&mut self, order_id: &str, country: &str) -> &mut OrderRecord {
        let pos = match self.index.get(order_id) {
            Some(&pos) => pos,
            None => {
                let pos = self.orders.len();
                self.orders.push(OrderRecord::new(order_id, country));
                self.index.insert(order_id.to_string(), pos);
                pos
            }
        };
        &mut self.orders[pos]
    }
}

impl<'a> IntoIterator for &'a OrderBook {
    type Item = &'a OrderRecord;
    type IntoIter = std::slice::Iter<'a, OrderRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.orders.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_row_pads_short_lines() {
        let row = RawRow::from_fields(vec!["1", "ORD-1", "US"], 2);
        assert_eq!(row.order_number, "ORD-1");
        assert_eq!(row.country, "US");
        assert_eq!(row.sku, "");
        assert_eq!(row.fail_detail, "");
        assert_eq!(row.line_number, 2);
    }

    #[test]
    fn test_raw_row_positional_mapping() {
        let fields: Vec<String> = (0..RAW_COLUMN_COUNT).map(|i| format!("c{}", i)).collect();
        let row = RawRow::from_fields(fields, 5);
        assert_eq!(row.order_number, format!("c{}", column::ORDER_NUMBER));
        assert_eq!(row.sku, format!("c{}", column::SKU));
        assert_eq!(row.quantity, format!("c{}", column::QUANTITY));
        assert_eq!(row.fail_code, format!("c{}", column::FAIL_CODE));
        assert_eq!(row.fail_detail, format!("c{}", column::FAIL_DETAIL));
        assert_eq!(row.unused, format!("c{}", column::UNUSED));

        let retained = row.into_failure_row();
        assert_eq!(retained.country, format!("c{}", column::COUNTRY));
        assert_eq!(retained.line_number, 5);
    }

    #[test]
    fn test_upsert_keeps_position_and_resets_availability() {
        let mut order = OrderRecord::new("A1", "US");
        order.upsert_item("SKU1", 10);
        order.upsert_item("SKU2", 1);
        assert!(order.mark_unavailable("SKU1"));

        order.upsert_item("SKU1", 4);
        let skus: Vec<&str> = order.skus().collect();
        assert_eq!(skus, vec!["SKU1", "SKU2"]);
        assert_eq!(
            order.item("SKU1"),
            Some(&ItemStatus {
                quantity: 4,
                available: true
            })
        );
    }

    #[test]
    fn test_mark_unavailable_ignores_unknown_sku() {
        let mut order = OrderRecord::new("A1", "US");
        order.upsert_item("SKU1", 1);
        assert!(!order.mark_unavailable("GHOST"));
        assert_eq!(order.items().len(), 1);
        assert!(order.is_all_available());
        assert!(!order.has_failure());
    }

    #[test]
    fn test_item_lookup_on_wide_order() {
        let mut order = OrderRecord::new("A1", "US");
        for i in 0..500 {
            order.upsert_item(&format!("SKU{}", i), i);
        }
        order.upsert_item("SKU7", 70);
        assert!(order.mark_unavailable("SKU499"));

        assert_eq!(order.items().len(), 500);
        assert_eq!(order.items()[7].sku, "SKU7");
        assert_eq!(order.item("SKU7").map(|s| s.quantity), Some(70));
        assert_eq!(order.item("SKU499").map(|s| s.available), Some(false));
        assert!(order.contains_sku("SKU0"));
        assert!(!order.contains_sku("SKU500"));
        let unavailable: Vec<&str> = order.unavailable_items().map(|l| l.sku.as_str()).collect();
        assert_eq!(unavailable, vec!["SKU499"]);
    }

    #[test]
    fn test_order_book_keeps_first_country_and_order() {
        let mut book = OrderBook::new();
        book.entry("B", "DE").upsert_item("X", 1);
        book.entry("A", "US").upsert_item("Y", 1);
        book.entry("B", "FR").upsert_item("Z", 1);

        let ids: Vec<&str> = book.iter().map(|o| o.order_id()).collect();
        assert_eq!(ids, vec!["B", "A"]);
        assert_eq!(book.get("B").map(|o| o.country()), Some("DE"));
        assert_eq!(book.get("B").map(|o| o.items().len()), Some(2));
        assert!(book.get("C").is_none());
    }
}
