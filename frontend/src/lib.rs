//! Browser client for the task API: a single-page sauron application.
//!
//! Rendering and effects live here; all list-state transitions go through
//! `state::Model::apply`. Failed requests are logged to the console and the
//! local list is left as it was.

use sauron::{
    html::{attributes::*, *},
    prelude::*,
};
use shared::{Task, TaskCounts, TaskFilter, UpdateTaskRequest};
use uuid::Uuid;
use web_sys::{console, window};

mod api;
mod state;

use state::{Change, Model};

#[derive(Debug, Clone)]
pub enum Msg {
    TasksLoaded(Vec<Task>),
    SetNewTaskTitle(String),
    SubmitNewTask,
    TaskCreated(Task),
    ToggleTask(Uuid),
    TaskUpdated(Task),
    DeleteTask(Uuid),
    TaskDeleted(Uuid),
    SetFilter(TaskFilter),
    RequestFailed(String),
}

impl Application for Model {
    type MSG = Msg;

    fn init(&mut self) -> Cmd<Msg> {
        self.loading = true;
        Cmd::new(async {
            match api::fetch_tasks().await {
                Ok(tasks) => Msg::TasksLoaded(tasks),
                Err(e) => Msg::RequestFailed(format!("Error fetching tasks: {e}")),
            }
        })
    }

    fn update(&mut self, msg: Msg) -> Cmd<Msg> {
        match msg {
            Msg::TasksLoaded(tasks) => {
                self.loading = false;
                self.apply(Change::ListLoaded(tasks));
                Cmd::none()
            }
            Msg::SetNewTaskTitle(task_title) => {
                self.new_task_title = task_title;
                Cmd::none()
            }
            Msg::SubmitNewTask => {
                let task_title = self.new_task_title.trim().to_string();
                if task_title.is_empty() {
                    return Cmd::none();
                }

                Cmd::new(async move {
                    match api::create_task(task_title).await {
                        Ok(task) => Msg::TaskCreated(task),
                        Err(e) => Msg::RequestFailed(format!("Error creating task: {e}")),
                    }
                })
            }
            Msg::TaskCreated(task) => {
                self.apply(Change::TaskAdded(task));
                self.new_task_title.clear();
                Cmd::none()
            }
            Msg::ToggleTask(id) => {
                let Some(completed) = self.completed_of(id) else {
                    return Cmd::none();
                };

                let patch = UpdateTaskRequest {
                    completed: Some(!completed),
                    ..UpdateTaskRequest::default()
                };
                Cmd::new(async move {
                    match api::update_task(id, patch).await {
                        Ok(task) => Msg::TaskUpdated(task),
                        Err(e) => Msg::RequestFailed(format!("Error updating task: {e}")),
                    }
                })
            }
            Msg::TaskUpdated(task) => {
                // Adopt the server-confirmed record; racing toggles resolve
                // to whichever response lands last.
                self.apply(Change::TaskUpdated(task));
                Cmd::none()
            }
            Msg::DeleteTask(id) => {
                let confirmed = window()
                    .and_then(|w| w.confirm_with_message("Are you sure you want to delete this task?").ok())
                    .unwrap_or(false);
                if !confirmed {
                    return Cmd::none();
                }

                Cmd::new(async move {
                    match api::delete_task(id).await {
                        Ok(()) => Msg::TaskDeleted(id),
                        Err(e) => Msg::RequestFailed(format!("Error deleting task: {e}")),
                    }
                })
            }
            Msg::TaskDeleted(id) => {
                self.apply(Change::TaskRemoved(id));
                Cmd::none()
            }
            Msg::SetFilter(filter) => {
                self.filter = filter;
                Cmd::none()
            }
            Msg::RequestFailed(message) => {
                self.loading = false;
                console::error_1(&message.into());
                Cmd::none()
            }
        }
    }

    fn view(&self) -> Node<Msg> {
        let counts = self.counts();
        div(
            [class("min-h-screen bg-ctp-base text-ctp-text")],
            [div(
                [class("max-w-2xl mx-auto px-4 py-10 space-y-8")],
                [
                    self.view_header(&counts),
                    self.view_add_form(),
                    self.view_filter_bar(),
                    if self.loading {
                        div(
                            [class("text-center py-10 text-ctp-subtext0 italic")],
                            [text("Loading...")],
                        )
                    } else {
                        self.view_task_list()
                    },
                ],
            )],
        )
    }
}

impl Model {
    fn view_header(&self, counts: &TaskCounts) -> Node<Msg> {
        div(
            [class("text-center space-y-4")],
            [
                h1(
                    [class("text-4xl font-bold text-ctp-mauve")],
                    [text("Task Manager")],
                ),
                div(
                    [class(
                        "inline-flex items-center gap-3 px-4 py-2 bg-ctp-surface0 rounded-full shadow-sm",
                    )],
                    [
                        span(
                            [class("text-sm font-medium text-ctp-blue")],
                            [text(&format!("{} active", counts.active))],
                        ),
                        span([class("w-1 h-1 bg-ctp-overlay0 rounded-full")], []),
                        span(
                            [class("text-sm font-medium text-ctp-green")],
                            [text(&format!("{} completed", counts.completed))],
                        ),
                    ],
                ),
            ],
        )
    }

    fn view_add_form(&self) -> Node<Msg> {
        div(
            [class("flex gap-3")],
            [
                input(
                    [
                        r#type("text"),
                        placeholder("What needs to be done?"),
                        value(&self.new_task_title),
                        on_input(|event| Msg::SetNewTaskTitle(event.value())),
                        class(
                            "flex-1 px-4 py-2 bg-ctp-surface0 border border-ctp-surface1 rounded-lg text-ctp-text placeholder-ctp-subtext0 focus:outline-none focus:border-ctp-mauve",
                        ),
                    ],
                    [],
                ),
                button(
                    [
                        on_click(|_| Msg::SubmitNewTask),
                        class(
                            "px-6 py-2 bg-ctp-mauve text-ctp-base font-medium rounded-lg hover:bg-ctp-lavender transition-colors duration-200",
                        ),
                    ],
                    [text("Add Task")],
                ),
            ],
        )
    }

    fn view_filter_bar(&self) -> Node<Msg> {
        div(
            [class("flex gap-2 justify-center")],
            TaskFilter::ALL
                .iter()
                .map(|&filter| {
                    let is_active = self.filter == filter;
                    button(
                        [
                            on_click(move |_| Msg::SetFilter(filter)),
                            class(&format!(
                                "px-4 py-2 rounded-full text-sm font-medium transition-colors duration-200 {}",
                                if is_active {
                                    "bg-ctp-mauve text-ctp-base"
                                } else {
                                    "bg-ctp-surface0 text-ctp-subtext1 hover:bg-ctp-surface1"
                                }
                            )),
                        ],
                        [text(filter.label())],
                    )
                })
                .collect::<Vec<_>>(),
        )
    }

    fn view_task_list(&self) -> Node<Msg> {
        let visible = self.visible_tasks();

        if visible.is_empty() {
            let placeholder_text = match self.filter {
                TaskFilter::All => "No tasks yet. Add one above to get started!",
                TaskFilter::Active => "No active tasks. All caught up!",
                TaskFilter::Completed => "No completed tasks yet.",
            };
            return div(
                [class("text-center py-12 text-ctp-subtext0")],
                [text(placeholder_text)],
            );
        }

        ul(
            [class("space-y-3")],
            visible
                .iter()
                .map(|task| self.view_task(task))
                .collect::<Vec<_>>(),
        )
    }

    fn view_task(&self, task: &Task) -> Node<Msg> {
        li(
            [
                key(task.id.to_string()),
                class(
                    "flex items-start gap-3 p-4 bg-ctp-surface0 rounded-lg shadow-sm border border-ctp-surface1",
                ),
            ],
            [
                input(
                    [
                        r#type("checkbox"),
                        checked(task.completed),
                        on_click({
                            let task_id = task.id;
                            move |_| Msg::ToggleTask(task_id)
                        }),
                        class("w-5 h-5 mt-0.5 rounded accent-ctp-mauve"),
                    ],
                    [],
                ),
                div(
                    [class("flex-1 min-w-0")],
                    [
                        span(
                            [class(&format!(
                                "block break-words {}",
                                if task.completed {
                                    "line-through text-ctp-overlay1"
                                } else {
                                    "text-ctp-text"
                                }
                            ))],
                            [text(&task.title)],
                        ),
                        match &task.description {
                            Some(description) => p(
                                [class("text-sm text-ctp-subtext0 break-words")],
                                [text(description)],
                            ),
                            None => span([], []),
                        },
                    ],
                ),
                button(
                    [
                        on_click({
                            let task_id = task.id;
                            move |_| Msg::DeleteTask(task_id)
                        }),
                        r#type("button"),
                        class("px-3 py-1 text-sm text-ctp-red hover:bg-ctp-red/10 rounded"),
                    ],
                    [text("Delete")],
                ),
            ],
        )
    }
}

#[wasm_bindgen::prelude::wasm_bindgen(start)]
pub fn main() {
    console_error_panic_hook::set_once();
    Program::mount_to_body(Model::default());
}
