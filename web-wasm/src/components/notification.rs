//! 通知トースト（一定時間で自動的に閉じる）

use leptos::prelude::*;

use crate::controller::WizardController;

#[component]
pub fn NotificationToast(controller: WizardController) -> impl IntoView {
    let notification = controller.notification;

    view! {
        <div class=move || {
            notification.with(|slot| match slot.current() {
                Some(n) => format!("notification {} show", n.level.css_class()),
                None => "notification".to_string(),
            })
        }>
            {move || {
                notification.with(|slot| slot.current().cloned()).map(|n| view! {
                    <i class=n.level.icon_class()></i>
                    <div class="notification-content">
                        <h4>{n.title}</h4>
                        <p>{n.message}</p>
                    </div>
                })
            }}
        </div>
    }
}
