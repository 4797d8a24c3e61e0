use contracts::domain::a001_bouquet::aggregate::BouquetListItem;
use leptos::prelude::*;
use thaw::*;

use crate::domain::a002_basket::context::use_basket;
use crate::shared::icons::icon;
use crate::shared::number_format::format_price;

/// Карточка букета с управлением количеством в корзине
#[component]
pub fn BouquetCard(
    bouquet: BouquetListItem,
    /// Open the detailed card
    on_open: Callback<()>,
) -> impl IntoView {
    let basket = use_basket();
    let id = bouquet.id;
    let product = StoredValue::new(bouquet.to_product());
    let quantity = Memo::new(move |_| basket.item_quantity(id));

    let add = move |_| basket.add_item(product.get_value(), 1);
    let increment = move |_| basket.update_quantity(id, quantity.get_untracked().saturating_add(1));
    // the stepper drops the line at zero
    let decrement = move |_| basket.update_quantity(id, quantity.get_untracked().saturating_sub(1));
    let remove = move |_| basket.remove_item(id);

    view! {
        <div class="bouquet-card">
            <div class="bouquet-card__image" on:click=move |_| on_open.run(())>
                {match bouquet.main_image.as_ref() {
                    Some(image) => view! {
                        <img src=image.image_path.clone() alt=bouquet.name.clone() loading="lazy" />
                    }.into_any(),
                    None => view! { <div class="bouquet-card__placeholder">{icon("flower")}</div> }.into_any(),
                }}
            </div>
            <div class="bouquet-card__body">
                <div class="bouquet-card__name" on:click=move |_| on_open.run(())>{bouquet.name.clone()}</div>
                <div class="bouquet-card__price">{format_price(bouquet.price)}</div>
            </div>
            <div class="bouquet-card__actions">
                {move || if quantity.get() == 0 {
                    view! {
                        <Button appearance=ButtonAppearance::Primary on_click=add>
                            {icon("shopping-cart")}
                            " В корзину"
                        </Button>
                    }.into_any()
                } else {
                    view! {
                        <div class="stepper">
                            <button class="button button--icon" on:click=decrement title="Меньше">
                                {icon("minus")}
                            </button>
                            <span class="stepper__value">{move || quantity.get()}</span>
                            <button class="button button--icon" on:click=increment title="Больше">
                                {icon("plus")}
                            </button>
                            <button class="button button--icon" on:click=remove title="Удалить из корзины">
                                {icon("trash")}
                            </button>
                        </div>
                    }.into_any()
                }}
            </div>
        </div>
    }
}
