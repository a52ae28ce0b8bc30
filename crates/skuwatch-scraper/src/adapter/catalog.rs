use super::{AdapterVariant, SiteAdapter};
use crate::extract::ExtractionRules;
use crate::overlay::{OverlayAction, OverlaySpec};

const OVERLAY_TIMEOUT_MS: u64 = 3_000;

const NEWEGG_RULES: ExtractionRules = ExtractionRules {
    container: ".item-cell",
    title: ".item-title",
    price: ".price-current",
    availability: ".item-promo, .item-button-area button",
};

const AMAZON_RULES: ExtractionRules = ExtractionRules {
    container: "div[data-component-type='s-search-result']",
    title: "h2",
    price: ".a-price .a-offscreen",
    availability: ".a-color-success, .a-color-price, button[name='submit.addToCart']",
};

const AMAZON_READY: &str = "div[data-component-type='s-search-result']";

const WALMART_OVERLAYS: &[OverlaySpec] = &[OverlaySpec {
    label: "promo modal",
    detect_query: "[data-automation-id='close-modal-button'], button[aria-label='Close dialog']",
    timeout_ms: OVERLAY_TIMEOUT_MS,
    action: OverlayAction::ClickFirst,
}];

const BESTBUY_CA_OVERLAYS: &[OverlaySpec] = &[
    OverlaySpec {
        label: "cookie consent",
        detect_query: "#onetrust-accept-btn-handler",
        timeout_ms: OVERLAY_TIMEOUT_MS,
        action: OverlayAction::ClickFirst,
    },
    // The second button keeps the Canadian storefront.
    OverlaySpec {
        label: "country selector",
        detect_query: "div[role='dialog'] button",
        timeout_ms: OVERLAY_TIMEOUT_MS,
        action: OverlayAction::ClickNth(1),
    },
];

pub(super) static ADAPTERS: &[SiteAdapter] = &[
    SiteAdapter {
        store_id: "bestbuy",
        variant: AdapterVariant::StandardDom,
        readiness_query: "li.sku-item",
        overlays: &[],
        rules: ExtractionRules {
            container: "li.sku-item",
            title: ".sku-title a, h4.sku-header a",
            price: ".priceView-customer-price span[aria-hidden='true'], .priceView-hero-price span",
            availability: ".fulfillment-add-to-cart-button button, .add-to-cart-button",
        },
    },
    SiteAdapter {
        store_id: "microcenter",
        variant: AdapterVariant::StandardDom,
        readiness_query: "li.product_wrapper",
        overlays: &[],
        rules: ExtractionRules {
            container: "li.product_wrapper",
            title: ".pDescription h2 a, .result_left a[data-name]",
            price: "span[itemprop='price'], .price",
            availability: ".stock, .inventoryCnt",
        },
    },
    SiteAdapter {
        store_id: "walmart",
        variant: AdapterVariant::GatedSpa,
        readiness_query: "[data-item-id]",
        overlays: WALMART_OVERLAYS,
        rules: ExtractionRules {
            container: "[data-item-id]",
            title: "[data-automation-id='product-title']",
            price: "[data-automation-id='product-price'] span.w_iUH7, [data-automation-id='product-price']",
            availability: "[data-automation-id='add-to-cart'], [data-automation-id='fulfillment-badge']",
        },
    },
    SiteAdapter {
        store_id: "newegg",
        variant: AdapterVariant::StandardDom,
        readiness_query: ".item-cell",
        overlays: &[],
        rules: NEWEGG_RULES,
    },
    SiteAdapter {
        store_id: "amazon",
        variant: AdapterVariant::StandardDom,
        readiness_query: AMAZON_READY,
        overlays: &[],
        rules: AMAZON_RULES,
    },
    SiteAdapter {
        store_id: "bestbuy-ca",
        variant: AdapterVariant::GatedSpa,
        readiness_query: ".x-productListItem",
        overlays: BESTBUY_CA_OVERLAYS,
        rules: ExtractionRules {
            container: ".x-productListItem",
            title: "[data-automation='productItemName']",
            price: "[data-automation='product-price'] span",
            availability: "[data-automation='shipping-availability-messages'], [data-automation='store-availability-messages']",
        },
    },
    SiteAdapter {
        store_id: "canadacomputers",
        variant: AdapterVariant::StandardDom,
        readiness_query: ".js-product",
        overlays: &[],
        rules: ExtractionRules {
            container: ".js-product",
            title: ".productTemplate_title a, .product-title a",
            price: ".pq-hdr-product_price strong, .price",
            availability: ".pq-hdr-bolder, .stock-status",
        },
    },
    SiteAdapter {
        store_id: "memoryexpress",
        variant: AdapterVariant::StandardDom,
        readiness_query: ".c-shca-list-item",
        overlays: &[],
        rules: ExtractionRules {
            container: ".c-shca-list-item",
            title: ".c-shca-list-item__body-main a",
            price: ".c-shca-list-item__price-listed",
            availability: ".c-shca-list-item__body-inventory",
        },
    },
    SiteAdapter {
        store_id: "newegg-ca",
        variant: AdapterVariant::StandardDom,
        readiness_query: ".item-cell",
        overlays: &[],
        rules: NEWEGG_RULES,
    },
    SiteAdapter {
        store_id: "amazon-ca",
        variant: AdapterVariant::StandardDom,
        readiness_query: AMAZON_READY,
        overlays: &[],
        rules: AMAZON_RULES,
    },
];
