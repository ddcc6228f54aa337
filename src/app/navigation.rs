use leptos::prelude::*;

use super::motion::use_section_motion;

#[component]
pub fn Navigation(owner: &'static str) -> impl IntoView {
    use_section_motion("nav");

    view! {
        <nav id="nav-bar" class="motion fixed top-0 w-full z-30 bg-[#111111]">
            <div class="max-w-6xl mx-auto px-4 md:px-8">
                <div class="flex items-center justify-between h-20">
                    <a href="#hero" class="text-white font-bold text-xl">
                        {owner}
                    </a>
                    <div class="hidden sm:flex gap-6 text-sm text-[#666666]">
                        <a href="#experience" class="hover:text-white transition-colors">
                            "EXPERIENCE"
                        </a>
                        <a href="#projects" class="hover:text-white transition-colors">
                            "PROJECTS"
                        </a>
                        <a href="#contact" class="hover:text-white transition-colors">
                            "CONTACT"
                        </a>
                    </div>
                </div>
            </div>
        </nav>
    }
}
