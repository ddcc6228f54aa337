use leptos::prelude::*;

use crate::portfolio;

use super::motion::use_section_motion;

#[component]
pub fn Hero(hero: &'static portfolio::Hero, owner: &'static str) -> impl IntoView {
    use_section_motion("hero");

    view! {
        <div class="pin-spacer relative z-20">
            <section id="hero" class="relative min-h-screen bg-[#f5f5f5] overflow-hidden">
                <div
                    id="hero-inner"
                    class="motion relative min-h-screen flex flex-col justify-between py-20 px-4 md:px-8 lg:px-16"
                >
                    <div class="flex-1 max-w-[55%]">
                        <div id="hero-title" class="motion mb-8">
                            <h1 class="text-[4rem] md:text-[6rem] lg:text-[8rem] font-bold leading-none tracking-tighter text-black">
                                {hero
                                    .title
                                    .iter()
                                    .map(|line| view! { <span class="block">{line.as_str()}</span> })
                                    .collect_view()}
                            </h1>
                            <p class="text-lg md:text-xl mt-4 text-black/80">
                                "— "{hero.tagline.as_str()}
                            </p>
                        </div>
                    </div>
                    <div class="absolute right-0 top-0 w-[45%] h-full">
                        <div class="relative w-full h-full flex flex-col items-end">
                            <div class="relative mt-20 mr-4 md:mr-8 lg:mr-16">
                                <div class="w-[280px] h-[380px] bg-[#1c1c1c] overflow-hidden">
                                    <img
                                        src=hero.portrait.as_str()
                                        alt=owner
                                        class="w-full h-full object-cover object-center"
                                    />
                                </div>
                                <div id="hero-name" class="motion absolute top-full mt-8 right-0 text-right">
                                    <p class="text-sm md:text-base text-black/80 mb-2">
                                        "— "{hero.note.as_str()}
                                    </p>
                                    <h2 class="text-[2.5rem] md:text-[3.5rem] lg:text-[4.5rem] font-bold leading-none tracking-tighter text-black">
                                        {hero
                                            .name
                                            .iter()
                                            .map(|line| view! { <span class="block">{line.as_str()}</span> })
                                            .collect_view()}
                                    </h2>
                                </div>
                            </div>
                        </div>
                    </div>
                    <div
                        id="hero-scroll"
                        class="motion absolute bottom-8 left-4 md:left-8 lg:left-16 flex items-center space-x-2"
                    >
                        <span class="text-black text-sm uppercase">"Scroll"</span>
                        <span class="text-black">"↓"</span>
                    </div>
                </div>
            </section>
        </div>
    }
}
