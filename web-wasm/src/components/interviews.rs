//! ステップ4: 面接スケジュール

use hire_wizard_common::schedule::{BREAK_OPTIONS, DURATION_OPTIONS};
use hire_wizard_common::{
    Activity, InterviewMode, InterviewSlot, ScheduleForm, ShortlistView, SlotCandidate, SlotField,
    Step,
};
use leptos::prelude::*;

use crate::components::success::EmailPreviewItem;
use crate::controller::WizardController;

#[component]
pub fn InterviewStep(controller: WizardController) -> impl IntoView {
    let is_sending = move || controller.with(|s| s.activity == Activity::SendingInvites);
    let has_preview = move || controller.with(|s| s.preview.is_some());

    view! {
        <section
            class="step-content"
            class:active=move || controller.with(|s| s.is_panel_visible(Step::Interviews))
        >
            <h2>"Schedule Interviews"</h2>

            <Shortlist controller=controller />

            <Show
                when=has_preview
                fallback=move || view! {
                    <ScheduleFormPanel controller=controller />
                    <SlotList controller=controller />
                }
            >
                <SchedulePreviewPanel controller=controller />
            </Show>

            <Show when=is_sending>
                <div class="loading">
                    <div class="spinner"></div>
                    <p>"Sending interview invitations..."</p>
                </div>
            </Show>

            <Show when=move || controller.with(|s| !s.failed_previews.is_empty())>
                <div class="email-previews email-failures">
                    <h3>"Failed Invitations"</h3>
                    {move || {
                        controller
                            .with(|s| s.failed_previews.clone())
                            .into_iter()
                            .map(|preview| view! { <EmailPreviewItem preview=preview /> })
                            .collect_view()
                    }}
                </div>
            </Show>

            <div class="step-actions">
                <button
                    class="btn btn-primary"
                    disabled=move || {
                        controller.with(|s| !ShortlistView::from_state(s).send_enabled || s.is_busy())
                    }
                    on:click=move |_| controller.send_interview_invites()
                >
                    <i class="fas fa-paper-plane"></i>
                    " Send Interview Invites"
                </button>
            </div>
        </section>
    }
}

#[component]
fn Shortlist(controller: WizardController) -> impl IntoView {
    let shortlist = move || controller.with(ShortlistView::from_state);

    view! {
        <div class="shortlist">
            <h3>"Shortlisted Candidates"</h3>
            {move || {
                let shortlist_view = shortlist();
                match shortlist_view.empty_message {
                    Some(message) => view! { <p class="text-muted">{message}</p> }.into_any(),
                    None => view! {
                        <ul class="shortlist-items">
                            {shortlist_view
                                .entries
                                .into_iter()
                                .map(|entry| view! {
                                    <li class="shortlist-item">
                                        <span class="candidate-name">{entry.name}</span>
                                        <span class="match-label">{entry.match_label}</span>
                                    </li>
                                })
                                .collect_view()}
                        </ul>
                    }
                    .into_any(),
                }
            }}
        </div>
    }
}

#[component]
fn ScheduleFormPanel(controller: WizardController) -> impl IntoView {
    let form = move |f: fn(&ScheduleForm) -> String| {
        move || controller.with(|s| f(&s.schedule_form))
    };

    view! {
        <div class="schedule-form">
            <div class="form-row">
                <label>
                    "Start Date"
                    <input
                        type="date"
                        prop:value=form(|f| f.start_date.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            controller.update_schedule_form(|f| f.start_date = value);
                        }
                    />
                </label>
                <label>
                    "Start Time"
                    <input
                        type="time"
                        prop:value=form(|f| f.start_time.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            controller.update_schedule_form(|f| f.start_time = value);
                        }
                    />
                </label>
            </div>

            <div class="form-row">
                <label>
                    "Interview Duration"
                    <select on:change=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                            controller.update_schedule_form(|f| f.duration = value);
                        }
                    }>
                        {DURATION_OPTIONS
                            .into_iter()
                            .map(|minutes| view! {
                                <option
                                    value=minutes.to_string()
                                    prop:selected=move || controller.with(|s| s.schedule_form.duration == minutes)
                                >
                                    {format!("{} minutes", minutes)}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Break Between Interviews"
                    <select on:change=move |ev| {
                        if let Ok(value) = event_target_value(&ev).parse::<u32>() {
                            controller.update_schedule_form(|f| f.break_time = value);
                        }
                    }>
                        {BREAK_OPTIONS
                            .into_iter()
                            .map(|minutes| view! {
                                <option
                                    value=minutes.to_string()
                                    prop:selected=move || controller.with(|s| s.schedule_form.break_time == minutes)
                                >
                                    {format!("{} minutes", minutes)}
                                </option>
                            })
                            .collect_view()}
                    </select>
                </label>
            </div>

            <div class="form-row">
                <label>
                    "Interview Mode"
                    <select on:change=move |ev| {
                        let mode = InterviewMode::parse(&event_target_value(&ev));
                        controller.update_schedule_form(|f| f.mode = mode);
                    }>
                        <option value="" prop:selected=move || controller.with(|s| s.schedule_form.mode.is_none())>
                            "Select interview mode"
                        </option>
                        <ModeOptions selected=Signal::derive(move || controller.with(|s| s.schedule_form.mode)) />
                    </select>
                </label>
                <label>
                    "Location / Meeting Link"
                    <input
                        type="text"
                        prop:value=form(|f| f.location.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            controller.update_schedule_form(|f| f.location = value);
                        }
                    />
                </label>
                <label>
                    "Interviewer Name"
                    <input
                        type="text"
                        prop:value=form(|f| f.interviewer.clone())
                        on:input=move |ev| {
                            let value = event_target_value(&ev);
                            controller.update_schedule_form(|f| f.interviewer = value);
                        }
                    />
                </label>
            </div>

            <button class="btn btn-primary" on:click=move |_| controller.generate_interview_slots()>
                <i class="fas fa-calendar-alt"></i>
                " Generate Interview Slots"
            </button>
        </div>
    }
}

#[component]
fn ModeOptions(selected: Signal<Option<InterviewMode>>) -> impl IntoView {
    InterviewMode::ALL
        .into_iter()
        .map(|mode| {
            view! {
                <option value=mode.as_str() prop:selected=move || selected.get() == Some(mode)>
                    {mode.option_label()}
                </option>
            }
        })
        .collect_view()
}

#[component]
fn SlotList(controller: WizardController) -> impl IntoView {
    let slot_ids = move || controller.with(|s| s.slots.iter().map(|slot| slot.id).collect::<Vec<_>>());

    view! {
        <div class="interview-slots">
            <For
                each=slot_ids
                key=|id| *id
                children=move |id| view! { <SlotEditor controller=controller id=id /> }
            />
            <div class="slot-actions">
                <button class="btn btn-secondary" on:click=move |_| controller.add_interview_slot()>
                    <i class="fas fa-plus"></i>
                    " Add Interview Slot"
                </button>
                <button class="btn btn-secondary" on:click=move |_| controller.show_interview_preview()>
                    <i class="fas fa-eye"></i>
                    " Preview Schedule"
                </button>
            </div>
        </div>
    }
}

/// 面接枠1件の編集フォーム
#[component]
fn SlotEditor(controller: WizardController, id: u64) -> impl IntoView {
    let field = move |f: fn(&InterviewSlot) -> String| {
        move || {
            controller.with(|s| {
                s.slots
                    .iter()
                    .find(|slot| slot.id == id)
                    .map(f)
                    .unwrap_or_default()
            })
        }
    };
    let title = move || {
        controller.with(|s| {
            s.slots
                .iter()
                .find(|slot| slot.id == id)
                .map(|slot| s.slot_title(slot))
                .unwrap_or_default()
        })
    };
    let is_manual = controller.state.with_untracked(|s| {
        s.slots
            .iter()
            .find(|slot| slot.id == id)
            .is_some_and(InterviewSlot::is_manual)
    });
    let min_date = controller.state.with_untracked(|s| {
        s.slots
            .iter()
            .find(|slot| slot.id == id)
            .and_then(|slot| slot.min_date.clone())
    });
    let mode = Signal::derive(move || {
        controller.with(|s| s.slots.iter().find(|slot| slot.id == id).map(|slot| slot.mode))
    });

    let update = move |make: fn(String) -> SlotField| {
        move |ev: web_sys::Event| controller.update_slot(id, make(event_target_value(&ev)))
    };

    view! {
        <div class="interview-slot">
            <div class="slot-header">
                <h4>{title}</h4>
                {is_manual.then(|| view! {
                    <button class="btn btn-danger btn-sm" on:click=move |_| controller.remove_slot(id)>
                        <i class="fas fa-trash"></i>
                    </button>
                })}
            </div>

            {is_manual.then(|| view! {
                <div class="form-row">
                    <input
                        type="text"
                        placeholder="Candidate Name"
                        prop:value=field(|slot| match &slot.candidate {
                            SlotCandidate::Manual { name, .. } => name.clone(),
                            _ => String::new(),
                        })
                        on:input=update(SlotField::CandidateName)
                    />
                    <input
                        type="email"
                        placeholder="Candidate Email"
                        prop:value=field(|slot| match &slot.candidate {
                            SlotCandidate::Manual { email, .. } => email.clone(),
                            _ => String::new(),
                        })
                        on:input=update(SlotField::CandidateEmail)
                    />
                </div>
            })}

            <div class="form-row">
                <input
                    type="date"
                    min=min_date
                    prop:value=field(|slot| slot.date.clone())
                    on:input=update(SlotField::Date)
                />
                <input
                    type="time"
                    prop:value=field(|slot| slot.time.clone())
                    on:input=update(SlotField::Time)
                />
                <select on:change=move |ev| {
                    if let Some(mode) = InterviewMode::parse(&event_target_value(&ev)) {
                        controller.update_slot(id, SlotField::Mode(mode));
                    }
                }>
                    <ModeOptions selected=mode />
                </select>
            </div>

            <div class="form-row">
                <input
                    type="text"
                    placeholder="Location / Meeting Link"
                    prop:value=field(|slot| slot.location.clone())
                    on:input=update(SlotField::Location)
                />
                <input
                    type="text"
                    placeholder="Interviewer Name"
                    prop:value=field(|slot| slot.interviewer.clone())
                    on:input=update(SlotField::Interviewer)
                />
            </div>
        </div>
    }
}

#[component]
fn SchedulePreviewPanel(controller: WizardController) -> impl IntoView {
    let preview = move || controller.with(|s| s.preview.clone());

    view! {
        <div class="interview-preview">
            {move || {
                preview().map(|preview| {
                    let duration = preview.duration_summary();
                    let break_time = preview.break_summary();
                    view! {
                        <div class="preview-summary">
                            <h3>"Interview Schedule"</h3>
                            <p>
                                <strong>"Duration: "</strong>{duration}
                                " | "
                                <strong>"Break: "</strong>{break_time}
                            </p>
                        </div>
                        {preview
                            .entries
                            .into_iter()
                            .enumerate()
                            .map(|(i, entry)| {
                                let class = if i % 2 == 0 {
                                    "preview-entry bg-white"
                                } else {
                                    "preview-entry bg-light"
                                };
                                view! {
                                    <div class=class>
                                        <h4>{entry.candidate_name}</h4>
                                        <p><i class="fas fa-calendar"></i>" "{entry.date_label}</p>
                                        <p>
                                            <i class="fas fa-clock"></i>
                                            {format!(" {} - {}", entry.start_label, entry.end_label)}
                                        </p>
                                        <p>
                                            <i class=format!("fas {}", entry.mode.icon_class())></i>
                                            " "
                                            {entry.mode.preview_label()}
                                        </p>
                                    </div>
                                }
                            })
                            .collect_view()}
                    }
                })
            }}
            <button class="btn btn-secondary" on:click=move |_| controller.modify_schedule()>
                <i class="fas fa-edit"></i>
                " Modify Schedule"
            </button>
        </div>
    }
}
