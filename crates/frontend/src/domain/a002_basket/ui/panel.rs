use contracts::domain::a002_basket::aggregate::BasketItem;
use leptos::prelude::*;

use crate::domain::a002_basket::context::use_basket;
use crate::shared::icons::icon;
use crate::shared::number_format::format_price;

/// Содержимое корзины в окне оформления
#[component]
pub fn BasketPanel() -> impl IntoView {
    let basket = use_basket();

    view! {
        <div class="basket-panel">
            <h3 class="basket-panel__title">"Корзина"</h3>
            {move || {
                let items = basket.items();
                if items.is_empty() {
                    view! { <div class="basket-panel__empty">"Корзина пуста"</div> }.into_any()
                } else {
                    items
                        .into_iter()
                        .map(|item| view! { <BasketLine item=item /> })
                        .collect_view()
                        .into_any()
                }
            }}
            <div class="basket-panel__total">
                <span>"Итого:"</span>
                <strong>{move || format_price(basket.total_price())}</strong>
            </div>
        </div>
    }
}

#[component]
fn BasketLine(item: BasketItem) -> impl IntoView {
    let basket = use_basket();
    let id = item.product.id;
    let quantity = item.quantity;
    let line_total = item.line_total();

    view! {
        <div class="basket-line">
            {item.product.image.clone().map(|src| view! {
                <img class="basket-line__image" src=src alt=item.product.name.clone() />
            })}
            <div class="basket-line__info">
                <div class="basket-line__name">{item.product.name.clone()}</div>
                <div class="basket-line__price">{format_price(item.product.price)}</div>
            </div>
            <div class="stepper">
                <button
                    class="button button--icon"
                    on:click=move |_| basket.update_quantity(id, quantity.saturating_sub(1))
                >
                    {icon("minus")}
                </button>
                <span class="stepper__value">{quantity}</span>
                <button
                    class="button button--icon"
                    on:click=move |_| basket.update_quantity(id, quantity.saturating_add(1))
                >
                    {icon("plus")}
                </button>
            </div>
            <div class="basket-line__total">{format_price(line_total)}</div>
            <button class="button button--icon" title="Удалить" on:click=move |_| basket.remove_item(id)>
                {icon("trash")}
            </button>
        </div>
    }
}
