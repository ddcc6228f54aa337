use leptos::prelude::*;

use crate::portfolio::Paragraph;

use super::motion::use_section_motion;

#[component]
pub fn Philosophy(paragraphs: &'static [Paragraph]) -> impl IntoView {
    use_section_motion("philosophy");

    view! {
        <div class="pin-spacer">
            <section
                id="philosophy"
                class="min-h-screen bg-[#111111] flex items-center justify-center py-20 px-4 md:px-8 lg:px-16"
            >
                <div class="max-w-4xl w-full mx-auto space-y-16">
                    {paragraphs
                        .iter()
                        .enumerate()
                        .map(|(index, paragraph)| {
                            view! {
                                <p
                                    id=format!("philosophy-{index}")
                                    class="motion text-[#888888] text-xl md:text-2xl font-normal tracking-tight leading-relaxed"
                                >
                                    {paragraph
                                        .iter()
                                        .map(|segment| {
                                            if segment.emphasis {
                                                view! {
                                                    <span class="text-white text-2xl md:text-4xl font-bold">
                                                        {segment.text.as_str()}
                                                    </span>
                                                }
                                                    .into_any()
                                            } else {
                                                segment.text.as_str().into_any()
                                            }
                                        })
                                        .collect_view()}
                                </p>
                            }
                        })
                        .collect_view()}
                </div>
            </section>
        </div>
    }
}
