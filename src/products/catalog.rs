//! Static product and origin data.

/// A country/manufacturer a product can be sourced from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Origin {
    pub key: &'static str,
    pub country: &'static str,
    pub country_key: &'static str,
    pub manufacturer: &'static str,
    pub flag: &'static str,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    pub key: &'static str,
    pub name: &'static str,
    pub translation_key: &'static str,
    pub origins: &'static [Origin],
}

impl Product {
    pub fn origin(&self, key: &str) -> Option<&'static Origin> {
        self.origins.iter().find(|origin| origin.key == key)
    }
}

/// Look up a product by its card key.
pub fn product(key: &str) -> Option<&'static Product> {
    PRODUCTS.iter().find(|product| product.key == key)
}

pub fn products() -> &'static [Product] {
    PRODUCTS
}

const fn origin(
    key: &'static str,
    country: &'static str,
    country_key: &'static str,
    manufacturer: &'static str,
    flag: &'static str,
) -> Origin {
    Origin {
        key,
        country,
        country_key,
        manufacturer,
        flag,
    }
}

const MALAYSIA: &str = "origins.malaysia.country";
const INDONESIA: &str = "origins.indonesia.country";
const PERU: &str = "origins.peru.country";
const IVORY_COAST: &str = "origins.ivory_coast.country";
const GHANA: &str = "origins.ghana.country";
const ECUADOR: &str = "origins.ecuador.country";
const VENEZUELA: &str = "origins.venezuela.country";
const NIGERIA: &str = "origins.nigeria.country";
const CHINA: &str = "origins.china.country";
const USA: &str = "origins.usa.country";

static PRODUCTS: &[Product] = &[
    Product {
        key: "powder",
        name: "Natural Cocoa Powder",
        translation_key: "products.cocoa_powder.title",
        origins: &[
            origin("malaysia", "Malaysia", MALAYSIA, "Guan Chong Cocoa Manufacturer", "🇲🇾"),
            origin("indonesia", "Indonesia", INDONESIA, "PT Golden Harvest Cocoa Indonesia", "🇮🇩"),
            origin("peru", "Peru", PERU, "Machu Picchu Foods SA", "🇵🇪"),
        ],
    },
    Product {
        key: "liquor",
        name: "Cocoa Liquor",
        translation_key: "products.cocoa_liquor.title",
        origins: &[
            origin("ivory1", "Côte d'Ivoire", IVORY_COAST, "DIAKITE COCOA PRODUCTS SARL", "🇨🇮"),
            origin("ghana", "Ghana", GHANA, "Chocomac Ghana Limited", "🇬🇭"),
            origin("ivory2", "Côte d'Ivoire", IVORY_COAST, "Citract SA", "🇨🇮"),
            origin("peru", "Peru", PERU, "Machu Picchu Foods SA", "🇵🇪"),
            origin("ecuador1", "Ecuador", ECUADOR, "Chocolates Finos Nacionales Cofina S.A.", "🇪🇨"),
            origin("ecuador2", "Ecuador", ECUADOR, "Ecuador Kakao Processing Proecuakao S.A.", "🇪🇨"),
        ],
    },
    Product {
        key: "butter",
        name: "Pure Cocoa Butter",
        translation_key: "products.cocoa_butter.title",
        origins: &[
            origin("venezuela1", "Venezuela", VENEZUELA, "Cacaos Venezolanos de Calidad C.A.", "🇻🇪"),
            origin("venezuela2", "Venezuela", VENEZUELA, "Procesadora Cacao Real", "🇻🇪"),
            origin("ivory", "Côte d'Ivoire", IVORY_COAST, "DIAKITE COCOA PRODUCTS SARL", "🇨🇮"),
            origin("peru", "Peru", PERU, "Machu Picchu Foods SA", "🇵🇪"),
            origin("nigeria", "Nigeria", NIGERIA, "Johnwents Industries Limited", "🇳🇬"),
            origin("china", "China", CHINA, "Huadong Industrial Limited", "🇨🇳"),
            origin("ecuador1", "Ecuador", ECUADOR, "Chocolates Finos Nacionales Cofina S.A.", "🇪🇨"),
            origin("ecuador2", "Ecuador", ECUADOR, "Ecuador Kakao Processing Proecuakao S.A.", "🇪🇨"),
        ],
    },
    Product {
        key: "cake",
        name: "Cocoa Cake",
        translation_key: "products.cocoa_cake.title",
        origins: &[
            origin("usa", "USA", USA, "Savita Naturals LTD", "🇺🇸"),
            origin("venezuela", "Venezuela", VENEZUELA, "Procesadora Cacao Real", "🇻🇪"),
            origin("ivory", "Côte d'Ivoire", IVORY_COAST, "DIAKITE COCOA PRODUCTS SARL", "🇨🇮"),
            origin("peru", "Peru", PERU, "Machu Picchu Foods SA", "🇵🇪"),
            origin("nigeria", "Nigeria", NIGERIA, "Johnwents Industries Limited", "🇳🇬"),
            origin("china", "China", CHINA, "Huadong Industrial Limited", "🇨🇳"),
        ],
    },
    Product {
        key: "bean",
        name: "Cocoa Beans",
        translation_key: "products.cocoa_bean.title",
        origins: &[origin("ecuador", "Ecuador", ECUADOR, "ECO-KAKAO S.A.", "🇪🇨")],
    },
];
