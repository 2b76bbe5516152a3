use serde_json::{Value, json};

use crate::record::RawProduct;

/// The bootstrap product list loaded when no input file is given.
pub fn products() -> Vec<RawProduct> {
    vec![
        RawProduct::new(
            "1",
            "Google Pixel 6 Pro",
            json!({"color": "Cloudy White", "capacity": "128 GB"}),
        ),
        RawProduct::new("2", "Apple iPhone 12 Mini, 256GB, Blue", Value::Null),
        RawProduct::new(
            "3",
            "Apple iPhone 12 Pro Max",
            json!({"color": "Cloudy White", "capacity GB": 512}),
        ),
        RawProduct::new(
            "4",
            "Apple iPhone 11, 64GB",
            json!({"price": 389.99, "color": "Purple"}),
        ),
        RawProduct::new(
            "5",
            "Samsung Galaxy Z Fold2",
            json!({"price": 689.99, "color": "Brown"}),
        ),
        RawProduct::new(
            "6",
            "Apple AirPods",
            json!({"generation": "3rd", "price": 120}),
        ),
        RawProduct::new(
            "7",
            "Apple MacBook Pro 16",
            json!({
                "year": 2019,
                "price": 1849.99,
                "CPU model": "Intel Core i9",
                "Hard disk size": "1 TB"
            }),
        ),
        RawProduct::new(
            "8",
            "Apple Watch Series 8",
            json!({"Strap Colour": "Elderberry", "Case Size": "41mm"}),
        ),
        RawProduct::new(
            "9",
            "Beats Studio3 Wireless",
            json!({
                "Color": "Red",
                "Description": "High-performance wireless noise cancelling headphones"
            }),
        ),
        RawProduct::new(
            "10",
            "Apple iPad Mini 5th Gen",
            json!({"Capacity": "64 GB", "Screen size": 7.9}),
        ),
        RawProduct::new(
            "11",
            "Apple iPad Mini 5th Gen",
            json!({"Capacity": "254 GB", "Screen size": 7.9}),
        ),
        RawProduct::new(
            "12",
            "Apple iPad Air",
            json!({"Generation": "4th", "Price": "419.99", "Capacity": "64 GB"}),
        ),
        RawProduct::new(
            "13",
            "Apple iPad Air",
            json!({"Generation": "4th", "Price": "519.99", "Capacity": "256 GB"}),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ids_are_unique_and_sequential() {
        let seed = products();
        assert_eq!(seed.len(), 13);
        let ids: HashSet<_> = seed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids.len(), 13);
        assert_eq!(seed[0].id, "1");
        assert_eq!(seed[12].id, "13");
    }
}
