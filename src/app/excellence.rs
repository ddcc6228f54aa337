use leptos::prelude::*;

use super::motion::use_section_motion;

#[component]
pub fn Excellence(word: &'static str) -> impl IntoView {
    use_section_motion("excellence");

    // the stage is pinned inside the section, which grows to hold it
    view! {
        <section id="excellence" class="relative">
            <div
                id="excellence-stage"
                class="h-screen w-full overflow-hidden bg-[#111111] flex items-center justify-center px-4 sm:px-6 md:px-8"
            >
                <div id="excellence-track" class="motion relative">
                    <div
                        id="excellence-word"
                        class="motion text-[3rem] sm:text-[5rem] md:text-[8rem] lg:text-[12rem] xl:text-[16rem] font-bold tracking-tighter leading-none whitespace-nowrap text-white"
                    >
                        {word}
                    </div>
                </div>
            </div>
        </section>
    }
}
