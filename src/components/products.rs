use yew::prelude::*;

use super::notification::{use_notifier, NoticeKind};

pub struct Product {
    pub name: &'static str,
    pub summary: &'static str,
    pub image: &'static str,
}

pub const PRODUCTS: &[Product] = &[
    Product {
        name: "HDPE Tarpaulins",
        summary: "Lightweight, UV stabilised sheets for everyday covering.",
        image: "/assets/products/hdpe.webp",
    },
    Product {
        name: "PVC Coated Tarpaulins",
        summary: "Heavy duty, waterproof covers for trucks and godowns.",
        image: "/assets/products/pvc.webp",
    },
    Product {
        name: "Canvas Tarpaulins",
        summary: "Breathable cotton canvas for grain and machinery.",
        image: "/assets/products/canvas.webp",
    },
    Product {
        name: "Shade Nets",
        summary: "50 to 90 percent shade for nurseries and parking.",
        image: "/assets/products/shade.webp",
    },
];

pub fn quick_view_message(name: Option<&str>) -> String {
    format!(
        "Viewing: {} - Contact us for more details!",
        name.filter(|n| !n.is_empty()).unwrap_or("Product")
    )
}

#[function_component(ProductGrid)]
pub fn product_grid() -> Html {
    let notifier = use_notifier();

    html! {
        <div class="products-grid">
            { for PRODUCTS.iter().enumerate().map(|(i, product)| {
                let onclick = {
                    let notifier = notifier.clone();
                    let name = product.name;
                    Callback::from(move |e: MouseEvent| {
                        e.stop_propagation();
                        notifier.notify(quick_view_message(Some(name)), NoticeKind::Success);
                    })
                };
                html! {
                    <div class="product-card" data-aos="fade-up" data-aos-delay={(i * 100).to_string()}>
                        <div class="product-image">
                            <img data-src={product.image} alt={product.name} />
                            <button class="quick-view-btn" {onclick}>{"Quick View"}</button>
                        </div>
                        <div class="product-info">
                            <h3>{ product.name }</h3>
                            <p>{ product.summary }</p>
                        </div>
                    </div>
                }
            }) }
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quick_view_names_the_product() {
        assert_eq!(
            quick_view_message(Some("Shade Nets")),
            "Viewing: Shade Nets - Contact us for more details!"
        );
        assert!(quick_view_message(None).starts_with("Viewing: Product -"));
        assert!(quick_view_message(Some("")).starts_with("Viewing: Product -"));
    }
}
