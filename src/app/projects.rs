use leptos::prelude::*;
use leptos_use::{
    use_mouse_with_options, use_raf_fn_with_options, UseMouseCoordType, UseMouseOptions,
    UseMouseReturn, UseRafFnOptions,
};

use crate::motion::Follow;
use crate::portfolio::Project;

use super::motion::use_section_motion;

#[component]
pub fn Projects(projects: &'static [Project]) -> impl IntoView {
    use_section_motion("projects");

    let (hovered, set_hovered) = signal(None::<usize>);
    let (position, set_position) = signal((0.0, 0.0));
    let follow = StoredValue::new(Follow::default());
    let UseMouseReturn { x, y, .. } =
        use_mouse_with_options(UseMouseOptions::default().coord_type(UseMouseCoordType::Client));

    let raf = use_raf_fn_with_options(
        move |_| {
            let next = follow.try_update_value(|f| {
                f.retarget(x.get_untracked(), y.get_untracked());
                f.step()
            });
            if let Some(next) = next {
                set_position.set(next);
            }
        },
        UseRafFnOptions::default().immediate(false),
    );

    // the follower only runs while a preview is showing
    Effect::new(move |_| {
        if hovered.get().is_some() {
            (raf.resume)();
        } else {
            (raf.pause)();
        }
    });

    let show = move |index: usize| {
        if hovered.get_untracked().is_none() {
            follow.update_value(|f| {
                f.retarget(x.get_untracked(), y.get_untracked());
                f.snap();
            });
            set_position.set((x.get_untracked(), y.get_untracked()));
        }
        set_hovered.set(Some(index));
    };

    view! {
        <section id="projects" class="min-h-[80vh] bg-[#111111] px-4 sm:px-8 md:px-16 py-12">
            <div class="max-w-[1400px] mx-auto">
                <div id="projects-title" class="mb-12 sm:mb-16 pt-12 overflow-hidden">
                    <h2
                        id="projects-heading"
                        class="motion text-5xl sm:text-6xl md:text-7xl lg:text-8xl text-white font-bold tracking-tighter"
                    >
                        "Projects"
                    </h2>
                </div>
                <div class="grid grid-cols-1">
                    {projects
                        .iter()
                        .enumerate()
                        .map(|(index, project)| {
                            view! {
                                <a
                                    href=project.link.as_str()
                                    class="group relative block border-t border-[#333333] last:border-b"
                                >
                                    <div
                                        class="py-6 sm:py-8 md:py-12 flex justify-between items-center"
                                        on:mouseenter=move |_| show(index)
                                        on:mouseleave=move |_| set_hovered.set(None)
                                    >
                                        <h2 class="text-3xl sm:text-5xl md:text-7xl font-bold text-[#333333] transition-colors duration-700 group-hover:text-white">
                                            {project.name.as_str()}
                                        </h2>
                                        <span class="text-sm sm:text-base text-[#666666]">
                                            {project.kind.as_str()}
                                        </span>
                                    </div>
                                </a>
                            }
                        })
                        .collect_view()}
                </div>
            </div>
            {move || {
                hovered
                    .get()
                    .and_then(|index| projects.get(index))
                    .map(|project| {
                        view! {
                            <div
                                class="project-preview fixed pointer-events-none z-[9999] w-[320px] h-[200px] -translate-x-1/2 -translate-y-1/2"
                                style:left=move || format!("{}px", position.get().0)
                                style:top=move || format!("{}px", position.get().1)
                            >
                                <div class="relative w-full h-full overflow-hidden rounded-lg shadow-2xl bg-black">
                                    <img
                                        src=project.image.as_str()
                                        alt=project.name.as_str()
                                        class="w-full h-full object-cover"
                                    />
                                </div>
                            </div>
                        }
                    })
            }}
        </section>
    }
}
