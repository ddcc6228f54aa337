use leptos::prelude::*;

use crate::portfolio::Paragraph;

use super::motion::use_section_motion;

#[component]
pub fn Learning(paragraphs: &'static [Paragraph]) -> impl IntoView {
    use_section_motion("learning");

    // emphasized phrases drift at their own rate, numbered across paragraphs
    let mut emphasized = 0;
    let paragraphs = paragraphs
        .iter()
        .enumerate()
        .map(|(index, paragraph)| {
            let segments = paragraph
                .iter()
                .map(|segment| {
                    if segment.emphasis {
                        let id = format!("learning-em-{emphasized}");
                        emphasized += 1;
                        view! {
                            <span id=id class="motion inline-block text-white text-2xl md:text-4xl font-bold">
                                {segment.text.as_str()}
                            </span>
                        }
                            .into_any()
                    } else {
                        segment.text.as_str().into_any()
                    }
                })
                .collect_view();
            view! {
                <p
                    id=format!("learning-{index}")
                    class="motion text-[#888888] text-xl md:text-2xl font-normal tracking-tight leading-relaxed"
                >
                    {segments}
                </p>
            }
        })
        .collect_view();

    view! {
        <section
            id="learning"
            class="min-h-screen bg-[#111111] flex items-center justify-end py-20 px-4 md:px-8 lg:px-16 relative z-0"
        >
            <div class="max-w-4xl w-full mx-auto pl-0 md:pl-[10%] lg:pl-[20%] space-y-16">
                {paragraphs}
            </div>
        </section>
    }
}
