use leptos::prelude::*;

use super::motion::use_section_motion;

#[component]
pub fn About(lines: &'static [String]) -> impl IntoView {
    use_section_motion("about");

    view! {
        <section
            id="about"
            class="relative min-h-screen bg-[#111111] flex items-center justify-center py-12 sm:py-16 md:py-20 px-4 sm:px-6 md:px-8 lg:px-16 z-10"
        >
            <div class="max-w-[90%] sm:max-w-[85%] md:max-w-4xl w-full flex justify-center">
                <div id="about-text" class="motion w-full sm:max-w-2xl space-y-1 sm:space-y-2">
                    {lines
                        .iter()
                        .map(|line| {
                            view! {
                                <p class="text-[1.25rem] sm:text-[1.5rem] md:text-[2rem] lg:text-[2.75rem] leading-snug sm:leading-tight text-[#333333] transition-colors duration-300 hover:text-[#666666] font-bold">
                                    {line.as_str()}
                                </p>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
        </section>
    }
}
