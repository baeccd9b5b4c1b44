//! Demo Transport
//!
//! Canned answers keyed on keywords in the question, for running without a
//! backend. The sales answer sends its chart in the loose object-literal
//! dialect the real service sometimes produces, and the inventory answer
//! uses lowercase dataset property aliases, so both exercise the full
//! chart pipeline.

use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};

use askdata_charts::to_object_literal;
use askdata_core::{RawChatResponse, STATUS_ERROR, STATUS_VALID};

use crate::transport::QueryTransport;
use crate::types::TransportResult;

/// Which canned answer a question maps to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DemoTopic {
    Sales,
    Customers,
    Inventory,
    Error,
    General,
}

impl DemoTopic {
    /// Pick a topic from the question's keywords (first match wins).
    pub fn for_question(question: &str) -> Self {
        let lower = question.to_lowercase();
        let mentions = |words: &[&str]| words.iter().any(|w| lower.contains(w));

        if mentions(&["sales", "revenue"]) {
            DemoTopic::Sales
        } else if mentions(&["customer", "user"]) {
            DemoTopic::Customers
        } else if mentions(&["inventory", "stock"]) {
            DemoTopic::Inventory
        } else if mentions(&["error"]) {
            DemoTopic::Error
        } else {
            DemoTopic::General
        }
    }
}

/// Fixture-backed transport.
#[derive(Debug, Clone, Default)]
pub struct DemoTransport {
    delay: Duration,
}

impl DemoTransport {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The canned answer for a question, without the simulated delay.
    pub fn answer(question: &str) -> RawChatResponse {
        match DemoTopic::for_question(question) {
            DemoTopic::Sales => sales_answer(),
            DemoTopic::Customers => customers_answer(),
            DemoTopic::Inventory => inventory_answer(),
            DemoTopic::Error => error_answer(),
            DemoTopic::General => general_answer(),
        }
    }
}

#[async_trait]
impl QueryTransport for DemoTransport {
    fn name(&self) -> &'static str {
        "demo"
    }

    async fn send(&self, question: &str) -> TransportResult<RawChatResponse> {
        let topic = DemoTopic::for_question(question);
        tracing::debug!("[DemoTransport] Answering with {:?} fixture", topic);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(Self::answer(question))
    }
}

fn valid(sql_query: &str, insight: &str, data: Value, chart_data: Option<Value>) -> RawChatResponse {
    RawChatResponse {
        status: STATUS_VALID.to_string(),
        message: None,
        sql_query: sql_query.to_string(),
        insight: insight.to_string(),
        data,
        chart_data,
    }
}

fn sales_answer() -> RawChatResponse {
    let rows = json!([
        { "product_name": "iPhone 15", "total_sales": 125000, "transaction_count": 100, "avg_sale_amount": 1250 },
        { "product_name": "Samsung TV 55\"", "total_sales": 98000, "transaction_count": 70, "avg_sale_amount": 1400 },
        { "product_name": "MacBook Pro", "total_sales": 87500, "transaction_count": 50, "avg_sale_amount": 1750 },
        { "product_name": "PlayStation 5", "total_sales": 76000, "transaction_count": 152, "avg_sale_amount": 500 },
        { "product_name": "Air Fryer Deluxe", "total_sales": 65000, "transaction_count": 325, "avg_sale_amount": 200 },
        { "product_name": "Wireless Headphones", "total_sales": 54000, "transaction_count": 180, "avg_sale_amount": 300 },
        { "product_name": "Smart Watch", "total_sales": 48000, "transaction_count": 160, "avg_sale_amount": 300 },
        { "product_name": "Gaming Chair", "total_sales": 42000, "transaction_count": 84, "avg_sale_amount": 500 }
    ]);

    let labels: Vec<Value> = column(&rows, "product_name");
    let totals: Vec<Value> = column(&rows, "total_sales");
    let chart = json!({
        "render_mode": "frontend",
        "chart_type": "bar",
        "chart_config": {
            "labels": labels,
            "datasets": [{ "label": "Total Sales", "data": totals }]
        }
    });

    valid(
        "SELECT\n    p.product_name,\n    SUM(s.sales_amount) as total_sales,\n    COUNT(s.sale_id) as transaction_count,\n    AVG(s.sales_amount) as avg_sale_amount\nFROM sales s\nJOIN products p ON s.product_id = p.product_id\nWHERE s.sale_date >= DATE_SUB(CURDATE(), INTERVAL 30 DAY)\nGROUP BY p.product_name\nORDER BY total_sales DESC\nLIMIT 10;",
        "The sales data reveals strong performance in electronics and home appliances over the last 30 days. The iPhone 15 leads with $125,000 in total sales, followed by Samsung TV at $98,000. This represents a 15% increase compared to the previous month, indicating positive market trends. The average transaction value of $1,250 suggests customers are making significant purchases.",
        rows,
        Some(Value::String(to_object_literal(&chart))),
    )
}

fn customers_answer() -> RawChatResponse {
    valid(
        "SELECT\n    c.customer_id,\n    c.first_name,\n    c.last_name,\n    c.email,\n    COUNT(o.order_id) as total_orders,\n    SUM(o.order_total) as lifetime_value,\n    MAX(o.order_date) as last_order_date\nFROM customers c\nLEFT JOIN orders o ON c.customer_id = o.customer_id\nGROUP BY c.customer_id\nORDER BY lifetime_value DESC\nLIMIT 15;",
        "Customer analysis shows a diverse user base with varying engagement levels. Top customers have lifetime values ranging from $2,500 to $15,000. The data indicates that 68% of customers are repeat buyers, with an average of 3.2 orders per customer. Recent activity suggests strong customer retention, particularly among premium segment buyers.",
        json!([
            { "customer_id": 1001, "first_name": "John", "last_name": "Smith", "email": "j.smith@email.com", "total_orders": 12, "lifetime_value": 15000, "last_order_date": "2025-05-28" },
            { "customer_id": 1002, "first_name": "Sarah", "last_name": "Johnson", "email": "s.johnson@email.com", "total_orders": 8, "lifetime_value": 12500, "last_order_date": "2025-06-01" },
            { "customer_id": 1003, "first_name": "Michael", "last_name": "Brown", "email": "m.brown@email.com", "total_orders": 6, "lifetime_value": 9800, "last_order_date": "2025-05-30" },
            { "customer_id": 1004, "first_name": "Emily", "last_name": "Davis", "email": "e.davis@email.com", "total_orders": 5, "lifetime_value": 7200, "last_order_date": "2025-06-02" },
            { "customer_id": 1005, "first_name": "Robert", "last_name": "Wilson", "email": "r.wilson@email.com", "total_orders": 4, "lifetime_value": 5600, "last_order_date": "2025-05-25" }
        ]),
        None,
    )
}

fn inventory_answer() -> RawChatResponse {
    let rows = json!([
        { "product_name": "iPhone 15", "category": "Electronics", "current_stock": 5, "minimum_stock": 20, "maximum_stock": 100, "stock_status": "Low Stock" },
        { "product_name": "Gaming Headset", "category": "Gaming", "current_stock": 8, "minimum_stock": 15, "maximum_stock": 50, "stock_status": "Low Stock" },
        { "product_name": "Bluetooth Speaker", "category": "Electronics", "current_stock": 12, "minimum_stock": 25, "maximum_stock": 75, "stock_status": "Low Stock" },
        { "product_name": "Smart Watch", "category": "Wearables", "current_stock": 45, "minimum_stock": 20, "maximum_stock": 80, "stock_status": "Normal" },
        { "product_name": "Laptop Stand", "category": "Accessories", "current_stock": 85, "minimum_stock": 30, "maximum_stock": 100, "stock_status": "Normal" }
    ]);

    let chart = json!({
        "render_mode": "frontend",
        "chart_type": "stacked_bar",
        "chart_config": {
            "labels": column(&rows, "product_name"),
            "datasets": [
                { "label": "Current Stock", "data": column(&rows, "current_stock"), "backgroundcolor": "#118DFF", "borderwidth": 1 },
                { "label": "Minimum Stock", "data": column(&rows, "minimum_stock"), "backgroundcolor": "#EF4444", "borderwidth": 1 }
            ]
        }
    });

    valid(
        "SELECT\n    p.product_name,\n    p.category,\n    i.current_stock,\n    i.minimum_stock,\n    i.maximum_stock,\n    CASE\n        WHEN i.current_stock <= i.minimum_stock THEN 'Low Stock'\n        WHEN i.current_stock >= i.maximum_stock THEN 'Overstocked'\n        ELSE 'Normal'\n    END as stock_status\nFROM products p\nJOIN inventory i ON p.product_id = i.product_id\nORDER BY i.current_stock ASC;",
        "Inventory analysis reveals several critical stock situations. 15 products are currently below minimum stock levels, requiring immediate reordering. Electronics category shows the highest turnover rate, while home appliances maintain steady inventory levels. The system recommends prioritizing restocking for high-demand items like smartphones and gaming accessories.",
        rows,
        Some(chart),
    )
}

fn error_answer() -> RawChatResponse {
    RawChatResponse {
        status: STATUS_ERROR.to_string(),
        message: Some(
            "This is a demo error message. The system encountered an issue processing your request. In a real application, this could be due to database connectivity issues, invalid query parameters, or server errors."
                .to_string(),
        ),
        data: json!([]),
        ..Default::default()
    }
}

fn general_answer() -> RawChatResponse {
    valid(
        "SELECT\n    'General Query' as query_type,\n    COUNT(*) as total_records,\n    MIN(created_date) as earliest_record,\n    MAX(created_date) as latest_record\nFROM main_database_table\nWHERE status = 'active';",
        "This is a general response to your question. The system has processed your query and returned basic information about the dataset. For more specific insights, try asking about sales data, customer information, inventory levels, or specific metrics you're interested in analyzing.",
        json!([
            { "query_type": "General Query", "total_records": 10457, "earliest_record": "2024-01-01", "latest_record": "2025-06-04" },
            { "metric": "Database Health", "status": "Excellent", "last_updated": "2025-06-04 08:30:00" },
            { "metric": "Data Completeness", "percentage": 98.5, "total_fields": 234 },
            { "metric": "Query Performance", "avg_response_time": "0.234s", "optimization_level": "High" }
        ]),
        None,
    )
}

fn column(rows: &Value, key: &str) -> Vec<Value> {
    rows.as_array()
        .map(|rows| rows.iter().map(|row| row[key].clone()).collect())
        .unwrap_or_default()
}
