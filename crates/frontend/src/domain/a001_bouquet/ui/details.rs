use contracts::domain::a001_bouquet::aggregate::{BouquetDetail, BouquetListItem};
use leptos::prelude::*;
use leptos::task::spawn_local;
use thaw::*;

use crate::domain::a001_bouquet::api::fetch_bouquet;
use crate::domain::a002_basket::context::use_basket;
use crate::shared::icons::icon;
use crate::shared::modal::Modal;
use crate::shared::number_format::format_price;

/// Quantity to add never drops below one
fn step_quantity(current: u32, delta: i32) -> u32 {
    current.saturating_add_signed(delta).max(1)
}

/// Подробная карточка букета из каталога
#[component]
pub fn BouquetDetails(bouquet: BouquetListItem, on_close: Callback<()>) -> impl IntoView {
    let basket = use_basket();
    let id = bouquet.id;
    let (detail, set_detail) = signal::<Option<BouquetDetail>>(None);
    let (error, set_error) = signal::<Option<String>>(None);
    let quantity = RwSignal::new(1u32);
    let fallback = StoredValue::new(bouquet.to_product());

    spawn_local(async move {
        match fetch_bouquet(id).await {
            Ok(d) => {
                set_detail.try_set(Some(d));
            }
            Err(e) => {
                log::error!("Failed to load bouquet {}: {}", id, e);
                set_error.try_set(Some(e.user_message("Не удалось загрузить букет")));
            }
        }
    });

    let add_to_basket = move |_| {
        let product = detail
            .with_untracked(|d| d.as_ref().map(|d| d.to_product()))
            .unwrap_or_else(|| fallback.get_value());
        basket.add_item(product, quantity.get_untracked());
        on_close.run(());
    };

    let image = bouquet.main_image.as_ref().map(|img| img.image_path.clone());
    let name = bouquet.name.clone();

    view! {
        <Modal title=bouquet.name.clone() on_close=on_close>
            <div class="bouquet-details">
                <div class="bouquet-details__gallery">
                    {move || {
                        let images = detail.with(|d| d.as_ref().map(|d| d.sorted_images()).unwrap_or_default());
                        if images.is_empty() {
                            match image.clone() {
                                Some(src) => view! { <img src=src alt=name.clone() /> }.into_any(),
                                None => view! { <div class="bouquet-card__placeholder">{icon("flower")}</div> }.into_any(),
                            }
                        } else {
                            images
                                .into_iter()
                                .map(|img| view! { <img src=img.image_path alt=name.clone() loading="lazy" /> })
                                .collect_view()
                                .into_any()
                        }
                    }}
                </div>

                <div class="bouquet-details__price">{format_price(bouquet.price)}</div>

                {move || error.get().map(|e| view! { <div class="alert alert--error">{e}</div> })}

                {move || detail.get().map(|d| {
                    let flowers = d.flower_names();
                    view! {
                        <p class="bouquet-details__description">
                            {d.description.clone().filter(|s| !s.is_empty()).unwrap_or_else(|| "Описание отсутствует".to_string())}
                        </p>
                        <dl class="bouquet-details__fields">
                            {d.bouquet_type.map(|t| view! {
                                <dt>"Тип букета"</dt>
                                <dd>{t.name}</dd>
                            })}
                            {(!flowers.is_empty()).then(|| view! {
                                <dt>"Цветы"</dt>
                                <dd>{flowers}</dd>
                            })}
                        </dl>
                    }
                })}

                <div class="bouquet-details__actions">
                    <div class="stepper">
                        <button
                            class="button button--icon"
                            title="Меньше"
                            disabled=move || quantity.get() <= 1
                            on:click=move |_| quantity.update(|q| *q = step_quantity(*q, -1))
                        >
                            {icon("minus")}
                        </button>
                        <span class="stepper__value">{move || quantity.get()}</span>
                        <button
                            class="button button--icon"
                            title="Больше"
                            on:click=move |_| quantity.update(|q| *q = step_quantity(*q, 1))
                        >
                            {icon("plus")}
                        </button>
                    </div>
                    <Button appearance=ButtonAppearance::Primary on_click=add_to_basket>
                        {icon("shopping-cart")}
                        " В корзину"
                    </Button>
                </div>
            </div>
        </Modal>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_quantity_stays_at_least_one() {
        assert_eq!(step_quantity(1, -1), 1);
        assert_eq!(step_quantity(0, 0), 1);
        assert_eq!(step_quantity(3, -1), 2);
        assert_eq!(step_quantity(3, 1), 4);
    }
}
