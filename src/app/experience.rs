use leptos::prelude::*;

use crate::portfolio;

use super::motion::use_section_motion;

#[component]
pub fn Experience(experience: &'static [portfolio::Experience]) -> impl IntoView {
    let motion = use_section_motion("experience");
    let (active, set_active) = signal(0usize);
    let (hovered, set_hovered) = signal(None::<usize>);

    // scrolling through the pinned section walks down the list
    let count = experience.len();
    motion.observe("experience", move |progress| set_active.set(progress.step(count)));

    let shown = move || hovered.get().unwrap_or_else(|| active.get());

    view! {
        <div class="pin-spacer">
            <section
                id="experience"
                class="min-h-[100svh] bg-[#111111] flex items-center justify-center py-6 sm:py-10 md:py-20 px-4 sm:px-6 md:px-8 lg:px-16 relative overflow-hidden"
            >
                <div class="max-w-[1400px] w-full relative z-10">
                    <div class="grid grid-cols-1 sm:grid-cols-[1fr_1fr] gap-6 sm:gap-8 lg:gap-16 items-start sm:items-center">
                        <div class="space-y-4 sm:space-y-6 relative">
                            <div
                                id="experience-work"
                                class="motion absolute -z-10 left-0 -bottom-10 sm:-bottom-20 text-[6rem] sm:text-[8rem] lg:text-[12rem] font-bold tracking-[-0.05em] leading-[0.8] pointer-events-none text-white whitespace-nowrap overflow-hidden"
                            >
                                "WORK"
                            </div>
                            {experience
                                .iter()
                                .enumerate()
                                .map(|(index, exp)| {
                                    view! {
                                        <div
                                            class=move || {
                                                if shown() == index {
                                                    "relative text-lg sm:text-xl md:text-2xl lg:text-3xl xl:text-4xl font-bold leading-[0.9] cursor-pointer transition-colors duration-500 text-white"
                                                } else {
                                                    "relative text-lg sm:text-xl md:text-2xl lg:text-3xl xl:text-4xl font-bold leading-[0.9] cursor-pointer transition-colors duration-500 text-[#333333]"
                                                }
                                            }
                                            on:click=move |_| {
                                                set_active.set(index);
                                                set_hovered.set(None);
                                            }
                                            on:mouseenter=move |_| set_hovered.set(Some(index))
                                            on:mouseleave=move |_| set_hovered.set(None)
                                        >
                                            {exp.company.as_str()}
                                        </div>
                                    }
                                })
                                .collect_view()}
                        </div>
                        <div class="self-start sm:self-center space-y-4 sm:space-y-6">
                            {move || experience.get(shown()).map(|exp| view! { <ExperienceDetails exp /> })}
                        </div>
                    </div>
                </div>
            </section>
        </div>
    }
}

#[component]
fn ExperienceDetails(exp: &'static portfolio::Experience) -> impl IntoView {
    view! {
        <h3 class="text-white text-base sm:text-lg md:text-xl font-bold leading-none">
            {exp.company.as_str()}
        </h3>
        <div class="space-y-3 sm:space-y-4 text-[#888888] text-sm sm:text-base">
            <p>{exp.role.as_str()}</p>
            <p>{exp.period.as_str()}</p>
            <div class="leading-relaxed mt-4 sm:mt-8">{exp.description.as_str()}</div>
            <ul class="list-disc pl-4 sm:pl-5 mt-3 sm:mt-4 space-y-1">
                {exp
                    .highlights
                    .iter()
                    .map(|highlight| view! { <li>{highlight.as_str()}</li> })
                    .collect_view()}
                {exp
                    .link
                    .as_deref()
                    .map(|link| {
                        view! {
                            <li class="hover:text-white transition-colors">
                                <a href=link target="_blank" rel="noopener noreferrer">
                                    {link}
                                </a>
                            </li>
                        }
                    })}
            </ul>
        </div>
    }
}
