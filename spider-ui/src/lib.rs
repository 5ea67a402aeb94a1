//! Dashboard UI (summary cards and spider plot) for WebAssembly.

pub mod chart;

#[cfg(target_arch = "wasm32")]
mod styles;

#[cfg(target_arch = "wasm32")]
mod wasm_ui {
    use std::rc::Rc;

    use crate::chart::{format_tick, legend_entries, ChartFrame, ChartScale};
    use crate::styles;
    use serde_wasm_bindgen::from_value;
    use spider_core::{
        build_series, summarize, FailurePresentation, FilterSelection, LoadState, PlotLayout,
        PlottedSeries, RequestTracker, SpiderConfig, SpiderConfigOverrides, SpiderFilters, Summary,
        ALL_SENTINEL,
    };
    use spider_source::{HttpRecordSource, SourceConfig};
    use wasm_bindgen::prelude::*;
    use web_sys::{console, Document, Element, HtmlSelectElement, Window};
    use yew::platform::spawn_local;
    use yew::prelude::*;
    use yew::TargetCast;

    const HOME_FAILURES: FailurePresentation = FailurePresentation::ShowError;
    const PLOT_FAILURES: FailurePresentation = FailurePresentation::TreatAsEmpty;

    const ARM_OPTIONS: [(&str, &str); 3] =
        [(ALL_SENTINEL, "All Arms"), ("A", "Arm A"), ("B", "Arm B")];
    const DOSE_OPTIONS: [(&str, &str); 3] =
        [(ALL_SENTINEL, "All Doses"), ("1800", "1800"), ("3000", "3000")];
    const TUMOR_OPTIONS: [(&str, &str); 3] = [
        (ALL_SENTINEL, "All Types"),
        ("sqNSCLC", "sqNSCLC"),
        ("HNSCC", "HNSCC"),
    ];

    #[derive(Clone, Copy, PartialEq)]
    enum Page {
        Home,
        Plot,
    }

    #[derive(Clone, Copy)]
    enum FilterField {
        Arm,
        Dose,
        Tumor,
    }

    #[derive(Properties, Clone)]
    pub struct DashboardProps {
        pub source: Rc<HttpRecordSource>,
        pub config: Rc<SpiderConfig>,
    }

    impl PartialEq for DashboardProps {
        fn eq(&self, other: &Self) -> bool {
            Rc::ptr_eq(&self.source, &other.source) && Rc::ptr_eq(&self.config, &other.config)
        }
    }

    #[function_component(Dashboard)]
    fn dashboard(props: &DashboardProps) -> Html {
        use_effect_with((), |_| {
            if let Some(window) = web_sys::window() {
                if let Some(document) = window.document() {
                    if let Err(err) = styles::ensure_styles(&document) {
                        console::error_1(&err);
                    }
                }
            }
            || ()
        });

        let page = use_state(|| Page::Home);
        let navigate = |target: Page| {
            let page = page.clone();
            Callback::from(move |_: MouseEvent| page.set(target))
        };

        html! {
            <div class="spider-app">
                <nav class="spider-navbar">
                    <div class="spider-logo">{"Clinical Study Dashboard"}</div>
                    <div class="spider-nav-links">
                        <button
                            type="button"
                            class={classes!("spider-nav-link", (*page == Page::Home).then_some("is-active"))}
                            onclick={navigate(Page::Home)}
                        >
                            {"Home"}
                        </button>
                        <button
                            type="button"
                            class={classes!("spider-nav-link", (*page == Page::Plot).then_some("is-active"))}
                            onclick={navigate(Page::Plot)}
                        >
                            {"Plot"}
                        </button>
                    </div>
                </nav>
                <main class="spider-main">
                    {
                        match *page {
                            Page::Home => html! { <HomePage ..props.clone() /> },
                            Page::Plot => html! { <PlotPage ..props.clone() /> },
                        }
                    }
                </main>
            </div>
        }
    }

    #[function_component(HomePage)]
    fn home_page(props: &DashboardProps) -> Html {
        let state = use_state(LoadState::<Summary>::default);

        {
            let state = state.clone();
            let source = props.source.clone();
            use_effect_with((), move |_| {
                spawn_local(async move {
                    let result = source
                        .fetch(&SpiderFilters::default())
                        .await
                        .map_err(|err| err.to_string())
                        .and_then(|records| summarize(&records).map_err(|err| err.to_string()));
                    if let Err(message) = &result {
                        console::error_1(&JsValue::from_str(message));
                    }
                    state.set(LoadState::from_result(result));
                });
                || ()
            });
        }

        if let Some(message) = state.visible_error(HOME_FAILURES) {
            return html! { <div class="spider-error" role="alert">{ format!("Error: {message}") }</div> };
        }
        let Some(summary) = state.loaded() else {
            return html! { <div class="spider-skeleton">{"Loading…"}</div> };
        };

        html! {
            <div class="spider-page">
                <header class="spider-page-header">
                    <h1 class="spider-page-title">{"Study Overview"}</h1>
                </header>
                <div class="spider-card-grid">
                    { render_card("Unique Patients", summary.patient_count, None) }
                    { render_card("Treatment Arms", summary.arms.len(), Some(summary.arms_label())) }
                    { render_card("Dose Levels", summary.doses.len(), Some(summary.doses_label())) }
                </div>
            </div>
        }
    }

    fn render_card(title: &str, value: usize, detail: Option<String>) -> Html {
        html! {
            <section class="spider-card">
                <div class="spider-card-title">{ title }</div>
                <div class="spider-card-value">{ value }</div>
                {
                    detail
                        .filter(|text| !text.is_empty())
                        .map(|text| html! { <div class="spider-card-detail">{ text }</div> })
                        .unwrap_or_default()
                }
            </section>
        }
    }

    #[function_component(PlotPage)]
    fn plot_page(props: &DashboardProps) -> Html {
        let selection = use_state(FilterSelection::default);
        let state = use_state(LoadState::<Vec<PlottedSeries>>::default);
        let refreshing = use_state(|| true);
        let tracker = use_mut_ref(RequestTracker::new);

        {
            let state = state.clone();
            let refreshing = refreshing.clone();
            let tracker = tracker.clone();
            let source = props.source.clone();
            let config = props.config.clone();
            use_effect_with((*selection).clone(), move |selection| {
                let token = tracker.borrow_mut().issue();
                let filters = selection.to_filters();
                refreshing.set(true);

                spawn_local(async move {
                    let records = match filters {
                        Ok(filters) => source.fetch(&filters).await.map_err(|err| err.to_string()),
                        Err(err) => Err(err.to_string()),
                    };
                    let result = records.and_then(|records| {
                        build_series(&records, &config).map_err(|err| err.to_string())
                    });

                    let Some(result) = tracker.borrow().accept(token, result) else {
                        return;
                    };
                    if let Err(message) = &result {
                        console::warn_1(&JsValue::from_str(message));
                    }
                    state.set(LoadState::from_result(result));
                    refreshing.set(false);
                });
                || ()
            });
        }

        let on_select = |field: FilterField| {
            let selection = selection.clone();
            Callback::from(move |event: Event| {
                let select: HtmlSelectElement = event.target_unchecked_into();
                let mut next = (*selection).clone();
                match field {
                    FilterField::Arm => next.arm = select.value(),
                    FilterField::Dose => next.dose = select.value(),
                    FilterField::Tumor => next.tumor = select.value(),
                }
                selection.set(next);
            })
        };

        let on_reset = {
            let selection = selection.clone();
            Callback::from(move |_: MouseEvent| selection.set(FilterSelection::default()))
        };

        let layout = PlotLayout::from_config(&props.config);
        let content = match state.items(PLOT_FAILURES) {
            None => html! { <div class="spider-skeleton">{"Loading plot…"}</div> },
            Some([]) => {
                let data_state = if state.is_failed() { "failed" } else { "empty" };
                html! {
                    <div class="spider-empty" data-state={data_state}>
                        {"No data for the selected filters."}
                    </div>
                }
            }
            Some(series) => render_chart(series, &layout, *refreshing),
        };

        html! {
            <div class="spider-page">
                <header class="spider-page-header">
                    <h1 class="spider-page-title">{"Spider Plot"}</h1>
                    <p class="spider-page-subtitle">{"Tumor size % change over time by subject"}</p>
                </header>
                <section class="spider-toolbar">
                    { render_filter("arm", "Treatment Arms", &selection.arm, &ARM_OPTIONS, on_select(FilterField::Arm)) }
                    { render_filter("dose", "Doses", &selection.dose, &DOSE_OPTIONS, on_select(FilterField::Dose)) }
                    { render_filter("tumor", "Tumor Types", &selection.tumor, &TUMOR_OPTIONS, on_select(FilterField::Tumor)) }
                    <button type="button" class="spider-btn" onclick={on_reset}>{"Reset"}</button>
                </section>
                <section class="spider-card">
                    { content }
                </section>
            </div>
        }
    }

    fn render_filter(
        id: &'static str,
        label: &'static str,
        current: &str,
        options: &[(&'static str, &'static str)],
        onchange: Callback<Event>,
    ) -> Html {
        html! {
            <div class="spider-filter">
                <label class="spider-filter-label" for={id}>{ label }</label>
                <select id={id} class="spider-select" {onchange}>
                    {
                        for options.iter().map(|&(value, text)| html! {
                            <option value={value} selected={value == current}>{ text }</option>
                        })
                    }
                </select>
            </div>
        }
    }

    fn render_chart(series: &[PlottedSeries], layout: &PlotLayout, refreshing: bool) -> Html {
        let scale = ChartScale::new(ChartFrame::default(), series, layout.y_range);
        let frame = scale.frame();
        let view_box = format!("0 0 {} {}", frame.width, frame.height);
        let legend = legend_entries(series);

        html! {
            <figure class={classes!("spider-chart", refreshing.then_some("is-refreshing"))}>
                <figcaption class="spider-chart-title">{ layout.title.clone() }</figcaption>
                <svg class="spider-svg" viewBox={view_box} role="img" aria-label={layout.title.clone()}>
                    {
                        for scale.y_ticks().into_iter().map(|tick| {
                            let y = coord(scale.y(tick));
                            let class = if tick == 0.0 { "spider-zero" } else { "spider-grid" };
                            html! {
                                <g>
                                    <line class={class} x1={coord(scale.left())} x2={coord(scale.right())} y1={y.clone()} y2={y.clone()} />
                                    <text x={coord(scale.left() - 8.0)} y={coord(scale.y(tick) + 4.0)} text-anchor="end">
                                        { format_tick(tick) }
                                    </text>
                                </g>
                            }
                        })
                    }
                    {
                        for scale.x_ticks().into_iter().map(|tick| html! {
                            <text x={coord(scale.x(tick))} y={coord(scale.bottom() + 18.0)} text-anchor="middle">
                                { format_tick(tick) }
                            </text>
                        })
                    }
                    {
                        for layout.reference_lines.iter().map(|reference| {
                            let y = coord(scale.y(reference.y));
                            html! {
                                <line
                                    x1={coord(scale.left())}
                                    x2={coord(scale.right())}
                                    y1={y.clone()}
                                    y2={y.clone()}
                                    stroke={reference.line.color.clone()}
                                    stroke-width={reference.line.width.to_string()}
                                    stroke-dasharray="6 4"
                                >
                                    <title>{ format!("{} ({}%)", reference.label, format_tick(reference.y)) }</title>
                                </line>
                            }
                        })
                    }
                    { for series.iter().map(|s| render_series(&scale, s)) }
                    <text
                        class="spider-axis-title"
                        x={coord((scale.left() + scale.right()) / 2.0)}
                        y={coord(frame.height - 15.0)}
                        text-anchor="middle"
                    >
                        { layout.x_title.clone() }
                    </text>
                    <text
                        class="spider-axis-title"
                        x="0"
                        y="0"
                        text-anchor="middle"
                        transform={format!("translate(16 {}) rotate(-90)", coord((scale.top() + scale.bottom()) / 2.0))}
                    >
                        { layout.y_title.clone() }
                    </text>
                </svg>
                <ul class="spider-legend">
                    {
                        for legend.into_iter().map(|entry| html! {
                            <li class="spider-legend-item">
                                <span class="spider-legend-swatch" style={format!("background: {}", entry.color)}></span>
                                { entry.label }
                            </li>
                        })
                    }
                </ul>
            </figure>
        }
    }

    fn render_series(scale: &ChartScale, series: &PlottedSeries) -> Html {
        html! {
            <g data-group={series.group_key.clone()}>
                <path d={scale.path(series)} fill="none" stroke={series.color.clone()} stroke-width="2">
                    <title>{ format!("Subject {} · {}", series.subject_id, series.display_name) }</title>
                </path>
                {
                    for series.points.iter().map(|point| html! {
                        <circle
                            cx={coord(scale.x(point.week))}
                            cy={coord(scale.y(point.percent_change))}
                            r="3"
                            fill={series.color.clone()}
                        />
                    })
                }
            </g>
        }
    }

    fn coord(value: f64) -> String {
        format!("{value:.1}")
    }

    #[wasm_bindgen]
    pub fn mount_dashboard(
        selector: &str,
        base_url: Option<String>,
        config: Option<JsValue>,
    ) -> Result<(), JsValue> {
        let window: Window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
        let document: Document = window
            .document()
            .ok_or_else(|| JsValue::from_str("document is not available"))?;

        let target: Element = document
            .query_selector(selector)
            .map_err(|err| JsValue::from_str(&format!("invalid selector: {err:?}")))?
            .ok_or_else(|| JsValue::from_str("no element matches the selector"))?;

        let source_config = base_url
            .map(|url| SourceConfig::with_base_url(&url))
            .unwrap_or_default();
        let source = HttpRecordSource::new(&source_config)
            .map_err(|err| JsValue::from_str(&err.to_string()))?;

        let config = match config {
            Some(value) if !value.is_undefined() && !value.is_null() => {
                SpiderConfig::from(from_value::<SpiderConfigOverrides>(value)?)
            }
            _ => SpiderConfig::default(),
        };

        yew::Renderer::<Dashboard>::with_root_and_props(
            target,
            DashboardProps {
                source: Rc::new(source),
                config: Rc::new(config),
            },
        )
        .render();
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use wasm_ui::mount_dashboard;

#[cfg(not(target_arch = "wasm32"))]
pub fn mount_dashboard(
    _: &str,
    _: Option<String>,
    _: Option<wasm_bindgen::JsValue>,
) -> Result<(), wasm_bindgen::JsValue> {
    Err(wasm_bindgen::JsValue::from_str(
        "spider-ui only supports the wasm32 target",
    ))
}
