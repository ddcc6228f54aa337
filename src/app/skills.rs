use leptos::prelude::*;

use crate::portfolio;

use super::motion::use_section_motion;

const TITLE_IDS: [&str; 3] = ["skills-used-by", "skills-my-hands", "skills-and-mind"];

#[component]
pub fn Skills(skills: &'static portfolio::Skills) -> impl IntoView {
    use_section_motion("skills");

    view! {
        <section id="skills" class="relative min-h-screen bg-[#111111] overflow-hidden z-10">
            <div class="relative pt-8 px-4 lg:absolute lg:top-[5%] lg:left-[15%] z-10">
                <h1 class="text-[2.5rem] sm:text-[3.5rem] md:text-[4rem] lg:text-[5rem] xl:text-[6rem] leading-[1.1] font-bold">
                    {skills
                        .title
                        .iter()
                        .zip(TITLE_IDS)
                        .enumerate()
                        .map(|(index, (line, id))| {
                            let color = if index == 1 { "text-white" } else { "text-gray-400/80" };
                            view! {
                                <div id=id class=format!("motion block {color}")>
                                    {line.as_str()}
                                </div>
                            }
                        })
                        .collect_view()}
                </h1>
            </div>
            <div
                id="skills-content"
                class="relative lg:absolute right-0 w-full lg:w-2/3 mt-12 lg:mt-0 lg:top-[10%] min-h-[60vh]"
            >
                <div class="px-4 sm:px-8 lg:pl-16 lg:pr-20 grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-12 gap-8 lg:gap-4 pt-[5%]">
                    <SkillList
                        id="skills-languages"
                        heading="Languages"
                        items=&skills.languages
                        layout="sm:col-span-1 lg:col-span-5 lg:pl-[30%]"
                    />
                    <SkillList
                        id="skills-frameworks"
                        heading="Frameworks/ Libraries/ Others"
                        items=&skills.frameworks
                        layout="sm:col-span-1 lg:col-span-7"
                    />
                    <div id="skills-special" class="motion col-span-full mt-8 lg:mt-12 grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-12 gap-6">
                        <SkillList
                            id="skills-special-list"
                            heading="Special"
                            items=&skills.special
                            layout="sm:col-span-1 lg:col-span-5 lg:pl-[30%]"
                        />
                        <p class="sm:col-span-1 lg:col-span-7 text-gray-400 text-base sm:text-lg">
                            {skills.note.as_str()}
                        </p>
                    </div>
                </div>
            </div>
        </section>
    }
}

#[component]
fn SkillList(
    id: &'static str,
    heading: &'static str,
    items: &'static [String],
    layout: &'static str,
) -> impl IntoView {
    view! {
        <div id=id class=format!("motion {layout}")>
            <h3 class="text-white text-xl sm:text-2xl font-bold mb-6 uppercase">{heading}</h3>
            <ul class="space-y-3">
                {items
                    .iter()
                    .map(|item| {
                        view! {
                            <li class="flex items-start text-base sm:text-lg text-gray-400">
                                <span class="mr-2">"•"</span>
                                <span>{item.as_str()}</span>
                            </li>
                        }
                    })
                    .collect_view()}
            </ul>
        </div>
    }
}
