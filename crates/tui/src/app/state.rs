use std::time::{Duration, Instant};

use api_types::{
    EntityId, bill::Bill, card::Card, expense::Expense, income::Income, installment::Installment,
};
use chrono::NaiveDate;
use chrono_tz::Tz;
use store::{
    AppStore, Dashboard, Dispatch, Operation, Outcome, Request, Resource, Settlement, Slot,
    Toggle,
    resources::{
        Bills, Cards, Expenses, Incomes, Installments, card_installments, recurring_incomes,
        unpaid_bills,
    },
};

use crate::{
    forms::{Form, FormKind, Submission},
    ui::keymap::AppAction,
};

const TOAST_TTL: Duration = Duration::from_secs(3);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Dashboard,
    Bills,
    Expenses,
    Incomes,
    Cards,
    Installments,
    Settings,
}

impl Section {
    pub const ALL: [Section; 7] = [
        Self::Dashboard,
        Self::Bills,
        Self::Expenses,
        Self::Incomes,
        Self::Cards,
        Self::Installments,
        Self::Settings,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "Dashboard",
            Self::Bills => "Bills",
            Self::Expenses => "Expenses",
            Self::Incomes => "Incomes",
            Self::Cards => "Cards",
            Self::Installments => "Installments",
            Self::Settings => "Settings",
        }
    }

    fn index(self) -> usize {
        self as usize
    }

    /// `1` to `7`.
    fn from_digit(ch: char) -> Option<Self> {
        let index = ch.to_digit(10)?.checked_sub(1)?;
        Self::ALL.get(index as usize).copied()
    }

    fn step(self, delta: isize) -> Self {
        let len = Self::ALL.len() as isize;
        Self::ALL[(self.index() as isize + delta).rem_euclid(len) as usize]
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLevel {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct ToastState {
    pub message: String,
    pub level: ToastLevel,
    expires_at: Instant,
}

/// Delete waiting for `y`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Confirm {
    pub section: Section,
    pub id: EntityId,
    pub label: String,
}

#[derive(Debug)]
pub struct AppState {
    pub store: AppStore,
    pub section: Section,
    selected: [usize; Section::ALL.len()],
    pub unpaid_only: bool,
    pub recurring_only: bool,
    pub card_filter: Option<EntityId>,
    pub form: Option<Form>,
    pub confirm: Option<Confirm>,
    pub toast: Option<ToastState>,
    pub base_url: String,
    pub timezone: Tz,
    pub today: NaiveDate,
    pub reminder_days: u32,
    pub should_quit: bool,
}

impl AppState {
    pub fn new(base_url: String, timezone: Tz, today: NaiveDate, reminder_days: u32) -> Self {
        Self {
            store: AppStore::new(),
            section: Section::Dashboard,
            selected: [0; Section::ALL.len()],
            unpaid_only: false,
            recurring_only: false,
            card_filter: None,
            form: None,
            confirm: None,
            toast: None,
            base_url,
            timezone,
            today,
            reminder_days,
            should_quit: false,
        }
    }

    pub fn selected(&self, section: Section) -> usize {
        self.selected[section.index()]
    }

    pub fn dashboard(&self) -> Dashboard {
        Dashboard::build(&self.store, self.today, self.reminder_days)
    }

    pub fn visible_bills(&self) -> &[Bill] {
        if self.unpaid_only {
            self.store.bills.unpaid()
        } else {
            self.store.bills.items()
        }
    }

    pub fn visible_expenses(&self) -> &[Expense] {
        self.store.expenses.items()
    }

    pub fn visible_incomes(&self) -> &[Income] {
        if self.recurring_only {
            self.store.incomes.recurring()
        } else {
            self.store.incomes.items()
        }
    }

    pub fn visible_cards(&self) -> &[Card] {
        self.store.cards.items()
    }

    pub fn visible_installments(&self) -> &[Installment] {
        match &self.card_filter {
            Some(card_id) => self.store.installments.for_card(card_id),
            None => self.store.installments.items(),
        }
    }

    fn row_count(&self, section: Section) -> usize {
        match section {
            Section::Bills => self.visible_bills().len(),
            Section::Expenses => self.visible_expenses().len(),
            Section::Incomes => self.visible_incomes().len(),
            Section::Cards => self.visible_cards().len(),
            Section::Installments => self.visible_installments().len(),
            Section::Settings => Toggle::ALL.len(),
            Section::Dashboard => 0,
        }
    }

    /// Requests issued at startup: every collection, for the dashboard.
    pub fn initial_load(&mut self) -> Vec<Dispatch> {
        self.refresh(Section::Dashboard)
    }

    /// Expires the toast and moves the calendar.
    pub fn tick(&mut self, now: Instant, today: NaiveDate) {
        if self.toast.as_ref().is_some_and(|toast| now >= toast.expires_at) {
            self.toast = None;
        }
        self.today = today;
    }

    fn notify(&mut self, level: ToastLevel, message: impl Into<String>) {
        self.toast = Some(ToastState {
            message: message.into(),
            level,
            expires_at: Instant::now() + TOAST_TTL,
        });
    }

    /// Applies a key press; returns the requests to send.
    pub fn handle(&mut self, action: AppAction) -> Vec<Dispatch> {
        if action == AppAction::Quit {
            self.should_quit = true;
            return Vec::new();
        }
        if let Some(confirm) = self.confirm.take() {
            return match action {
                AppAction::Input('y' | 'Y') => self.delete(confirm).into_iter().collect(),
                _ => Vec::new(),
            };
        }
        if self.form.is_some() {
            return self.handle_form(action);
        }

        match action {
            AppAction::Input('q') => {
                self.should_quit = true;
                Vec::new()
            }
            AppAction::Input(ch @ '1'..='7') => {
                if let Some(section) = Section::from_digit(ch) {
                    self.section = section;
                }
                Vec::new()
            }
            AppAction::NextField => {
                self.section = self.section.step(1);
                Vec::new()
            }
            AppAction::PrevField => {
                self.section = self.section.step(-1);
                Vec::new()
            }
            AppAction::Up => {
                self.select_prev();
                Vec::new()
            }
            AppAction::Down => {
                self.select_next();
                Vec::new()
            }
            AppAction::Input('r') => self.refresh(self.section),
            AppAction::Input('a') => {
                self.open_form(false);
                Vec::new()
            }
            AppAction::Input('e') => {
                self.open_form(true);
                Vec::new()
            }
            AppAction::Submit | AppAction::Input(' ') if self.section == Section::Settings => {
                self.toggle_preference();
                Vec::new()
            }
            AppAction::Submit => {
                self.open_form(true);
                Vec::new()
            }
            AppAction::Input('d') => {
                self.open_confirm();
                Vec::new()
            }
            AppAction::Input('u') => self.toggle_filter(),
            AppAction::Input('c') if self.section == Section::Installments => {
                self.cycle_card_filter()
            }
            _ => Vec::new(),
        }
    }

    fn handle_form(&mut self, action: AppAction) -> Vec<Dispatch> {
        let Some(form) = self.form.as_mut() else {
            return Vec::new();
        };
        match action {
            AppAction::Cancel => self.form = None,
            AppAction::NextField | AppAction::Down => form.next_field(),
            AppAction::PrevField | AppAction::Up => form.prev_field(),
            AppAction::Left => form.cycle(-1),
            AppAction::Right => form.cycle(1),
            AppAction::Backspace => form.backspace(),
            AppAction::Input(ch) => form.input(ch),
            AppAction::Submit if form.awaiting.is_none() => match form.submission() {
                Ok(submission) => {
                    form.error = None;
                    let dispatch = self.save(submission);
                    if let Some(form) = self.form.as_mut() {
                        form.awaiting = Some(dispatch.ticket());
                    }
                    return vec![dispatch];
                }
                Err(message) => form.error = Some(message),
            },
            _ => {}
        }
        Vec::new()
    }

    fn save(&mut self, submission: Submission) -> Dispatch {
        match submission {
            Submission::Bill(target, fields) => self.upsert::<Bills>(target, fields),
            Submission::Expense(target, fields) => self.upsert::<Expenses>(target, fields),
            Submission::Income(target, fields) => self.upsert::<Incomes>(target, fields),
            Submission::Card(target, fields) => self.upsert::<Cards>(target, fields),
            Submission::Installment(target, fields) => self.upsert::<Installments>(target, fields),
        }
    }

    fn upsert<R: Slot>(&mut self, target: Option<EntityId>, fields: R::Fields) -> Dispatch {
        let request = match target {
            Some(id) => Request::Update(id, fields),
            None => Request::Create(fields),
        };
        self.store.begin::<R>(request)
    }

    /// Sections without records have nothing to delete and yield no request.
    fn delete(&mut self, confirm: Confirm) -> Option<Dispatch> {
        let Confirm { section, id, label } = confirm;
        let dispatch = match section {
            Section::Bills => self.store.begin::<Bills>(Request::Delete(id.clone())),
            Section::Expenses => self.store.begin::<Expenses>(Request::Delete(id.clone())),
            Section::Incomes => self.store.begin::<Incomes>(Request::Delete(id.clone())),
            Section::Cards => self.store.begin::<Cards>(Request::Delete(id.clone())),
            Section::Installments => self.store.begin::<Installments>(Request::Delete(id.clone())),
            Section::Dashboard | Section::Settings => {
                tracing::warn!(section = section.label(), %id, "nothing to delete here");
                return None;
            }
        };
        tracing::debug!(section = section.label(), %id, label = %label, "delete confirmed");
        Some(dispatch)
    }

    /// Applies a finished request; returns follow-up requests.
    pub fn settle(&mut self, settlement: Settlement) -> Vec<Dispatch> {
        let receipt = self.store.apply(settlement);

        let for_form = self.form.as_ref().is_some_and(|form| {
            form.awaiting == Some(receipt.ticket) && form_resource(form.kind) == receipt.resource
        });
        if for_form {
            match &receipt.outcome {
                Outcome::Failed(err) => {
                    if let Some(form) = self.form.as_mut() {
                        form.awaiting = None;
                        form.error = Some(err.to_string());
                    }
                }
                Outcome::Applied | Outcome::Stale => {
                    self.form = None;
                    self.notify(ToastLevel::Success, "Saved");
                }
            }
        }

        if let Operation::Delete(_) = receipt.operation {
            match &receipt.outcome {
                Outcome::Failed(err) => self.notify(ToastLevel::Error, format!("Delete failed: {err}")),
                _ => self.notify(ToastLevel::Success, "Deleted"),
            }
        }

        let mut follow_up = Vec::new();
        let saved = matches!(receipt.operation, Operation::Create | Operation::Update(_));
        if saved && receipt.outcome == Outcome::Applied {
            follow_up.extend(self.refresh_filtered_view(receipt.resource));
        }

        self.clamp_selection();
        follow_up
    }

    /// Re-fetches the filtered view on screen for `resource`, if any.
    fn refresh_filtered_view(&mut self, resource: &str) -> Option<Dispatch> {
        if resource == Bills::PATH && self.unpaid_only {
            return Some(self.store.begin::<Bills>(Request::View(unpaid_bills())));
        }
        if resource == Incomes::PATH && self.recurring_only {
            return Some(self.store.begin::<Incomes>(Request::View(recurring_incomes())));
        }
        if resource == Installments::PATH {
            if let Some(card_id) = self.card_filter.clone() {
                let key = card_installments(&card_id);
                return Some(self.store.begin::<Installments>(Request::View(key)));
            }
        }
        None
    }

    fn refresh(&mut self, section: Section) -> Vec<Dispatch> {
        let mut dispatches = Vec::new();
        match section {
            Section::Dashboard => {
                dispatches.push(self.store.begin::<Bills>(Request::List));
                dispatches.push(self.store.begin::<Expenses>(Request::List));
                dispatches.push(self.store.begin::<Incomes>(Request::List));
                dispatches.push(self.store.begin::<Cards>(Request::List));
                dispatches.push(self.store.begin::<Installments>(Request::List));
            }
            Section::Bills => {
                dispatches.push(self.store.begin::<Bills>(Request::List));
                dispatches.extend(self.refresh_filtered_view(Bills::PATH));
            }
            Section::Expenses => dispatches.push(self.store.begin::<Expenses>(Request::List)),
            Section::Incomes => {
                dispatches.push(self.store.begin::<Incomes>(Request::List));
                dispatches.extend(self.refresh_filtered_view(Incomes::PATH));
            }
            Section::Cards => dispatches.push(self.store.begin::<Cards>(Request::List)),
            Section::Installments => {
                dispatches.push(self.store.begin::<Cards>(Request::List));
                dispatches.push(self.store.begin::<Installments>(Request::List));
                dispatches.extend(self.refresh_filtered_view(Installments::PATH));
            }
            Section::Settings => {}
        }
        dispatches
    }

    fn toggle_filter(&mut self) -> Vec<Dispatch> {
        let enabled = match self.section {
            Section::Bills => {
                self.unpaid_only = !self.unpaid_only;
                self.unpaid_only
            }
            Section::Incomes => {
                self.recurring_only = !self.recurring_only;
                self.recurring_only
            }
            _ => return Vec::new(),
        };
        self.selected[self.section.index()] = 0;
        if !enabled {
            return Vec::new();
        }
        let resource = match self.section {
            Section::Bills => Bills::PATH,
            _ => Incomes::PATH,
        };
        self.refresh_filtered_view(resource).into_iter().collect()
    }

    /// All → first card → ... → last card → All.
    fn cycle_card_filter(&mut self) -> Vec<Dispatch> {
        let cards = self.store.cards.items();
        let next = match &self.card_filter {
            None => cards.first(),
            Some(current) => cards
                .iter()
                .position(|card| &card.id == current)
                .and_then(|index| cards.get(index + 1)),
        }
        .map(|card| card.id.clone());

        self.card_filter = next;
        self.selected[Section::Installments.index()] = 0;
        self.refresh_filtered_view(Installments::PATH)
            .into_iter()
            .collect()
    }

    fn open_form(&mut self, edit: bool) {
        let index = self.selected(self.section);
        let today = self.today;
        let form = match (self.section, edit) {
            (Section::Bills, false) => Some(Form::bill(None, today)),
            (Section::Bills, true) => self
                .visible_bills()
                .get(index)
                .map(|bill| Form::bill(Some(bill), today)),
            (Section::Expenses, false) => Some(Form::expense(None, today)),
            (Section::Expenses, true) => self
                .visible_expenses()
                .get(index)
                .map(|expense| Form::expense(Some(expense), today)),
            (Section::Incomes, false) => Some(Form::income(None, today)),
            (Section::Incomes, true) => self
                .visible_incomes()
                .get(index)
                .map(|income| Form::income(Some(income), today)),
            (Section::Cards, false) => Some(Form::card(None, today)),
            (Section::Cards, true) => self
                .visible_cards()
                .get(index)
                .map(|card| Form::card(Some(card), today)),
            (Section::Installments, false) => {
                Some(Form::installment(None, self.store.cards.items(), today))
            }
            (Section::Installments, true) => self
                .visible_installments()
                .get(index)
                .map(|plan| Form::installment(Some(plan), self.store.cards.items(), today)),
            (Section::Dashboard | Section::Settings, _) => None,
        };
        self.form = form;
    }

    fn open_confirm(&mut self) {
        let index = self.selected(self.section);
        let target = match self.section {
            Section::Bills => self
                .visible_bills()
                .get(index)
                .map(|bill| (bill.id.clone(), bill.name.clone())),
            Section::Expenses => self
                .visible_expenses()
                .get(index)
                .map(|expense| (expense.id.clone(), expense.category.clone())),
            Section::Incomes => self
                .visible_incomes()
                .get(index)
                .map(|income| (income.id.clone(), income.category.clone())),
            Section::Cards => self
                .visible_cards()
                .get(index)
                .map(|card| (card.id.clone(), card.name.clone())),
            Section::Installments => self
                .visible_installments()
                .get(index)
                .map(|plan| (plan.id.clone(), plan.description.clone())),
            Section::Dashboard | Section::Settings => None,
        };
        self.confirm = target.map(|(id, label)| Confirm {
            section: self.section,
            id,
            label,
        });
    }

    fn toggle_preference(&mut self) {
        let Some(toggle) = Toggle::ALL.get(self.selected(Section::Settings)).copied() else {
            return;
        };
        let enabled = self.store.preferences.toggle(toggle);
        let state = if enabled { "on" } else { "off" };
        self.notify(ToastLevel::Info, format!("{}: {state}", toggle.label()));
    }

    fn select_next(&mut self) {
        let len = self.row_count(self.section);
        if len == 0 {
            return;
        }
        let selected = &mut self.selected[self.section.index()];
        *selected = (*selected + 1).min(len - 1);
    }

    fn select_prev(&mut self) {
        let selected = &mut self.selected[self.section.index()];
        *selected = selected.saturating_sub(1);
    }

    fn clamp_selection(&mut self) {
        for section in Section::ALL {
            let len = self.row_count(section);
            let selected = &mut self.selected[section.index()];
            *selected = (*selected).min(len.saturating_sub(1));
        }
    }
}

fn form_resource(kind: FormKind) -> &'static str {
    match kind {
        FormKind::Bill => Bills::PATH,
        FormKind::Expense => Expenses::PATH,
        FormKind::Income => Incomes::PATH,
        FormKind::Card => Cards::PATH,
        FormKind::Installment => Installments::PATH,
    }
}

#[cfg(test)]
mod tests {
    use api_types::{
        Record,
        bill::{BillFields, BillStatus},
        card::{CardFields, CardType},
    };
    use engine::MoneyCents;
    use store::{ApiError, Response, ViewKey};

    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 6, 15).unwrap()
    }

    fn state() -> AppState {
        AppState::new(
            "http://127.0.0.1:5000/api/".to_string(),
            engine::format::DEFAULT_TIMEZONE,
            today(),
            7,
        )
    }

    fn bill(id: &str, status: BillStatus) -> Bill {
        Record::new(
            id,
            BillFields {
                name: format!("bill {id}"),
                amount: MoneyCents::from_major(100),
                due_date: today(),
                category: "utilities".to_string(),
                description: String::new(),
                status,
            },
        )
    }

    fn card(id: &str) -> Card {
        Record::new(
            id,
            CardFields {
                name: format!("card {id}"),
                kind: CardType::Credit,
                number: "5555444433332222".to_string(),
                expiry_date: today(),
                limit: MoneyCents::from_major(1000),
                is_active: true,
                balance: MoneyCents::ZERO,
            },
        )
    }

    fn answer_bills(dispatch: Dispatch, response: Result<Response<Bills>, ApiError>) -> Settlement {
        match dispatch {
            Dispatch::Bills(pending) => Settlement::Bills(pending.resolve(response)),
            _ => panic!("expected a bills request"),
        }
    }

    fn press(state: &mut AppState, keys: &str) -> Vec<Dispatch> {
        keys.chars()
            .flat_map(|ch| state.handle(AppAction::Input(ch)))
            .collect()
    }

    fn with_bills(bills: Vec<Bill>) -> AppState {
        let mut state = state();
        state.section = Section::Bills;
        let dispatch = state.refresh(Section::Bills).remove(0);
        state.settle(answer_bills(dispatch, Ok(Response::Items(bills))));
        state
    }

    fn with_cards(cards: Vec<Card>) -> AppState {
        let mut state = state();
        let Dispatch::Cards(pending) = state.store.begin::<Cards>(Request::List) else {
            panic!("expected a cards request");
        };
        state.settle(Settlement::Cards(pending.resolve(Ok(Response::Items(cards)))));
        state.section = Section::Installments;
        state
    }

    #[test]
    fn startup_lists_every_collection() {
        let mut state = state();
        let dispatches = state.initial_load();
        let resources: Vec<&str> = dispatches.iter().map(Dispatch::resource).collect();
        assert_eq!(
            resources,
            vec!["bills", "expenses", "incomes", "cards", "installments"]
        );
        assert!(dispatches.iter().all(|d| d.operation() == Operation::List));
        assert!(state.store.is_loading());
    }

    #[test]
    fn digits_and_tab_switch_sections() {
        let mut state = state();
        press(&mut state, "6");
        assert_eq!(state.section, Section::Installments);
        state.handle(AppAction::NextField);
        assert_eq!(state.section, Section::Settings);
        state.handle(AppAction::NextField);
        assert_eq!(state.section, Section::Dashboard);
        state.handle(AppAction::PrevField);
        assert_eq!(state.section, Section::Settings);
        press(&mut state, "9");
        assert_eq!(state.section, Section::Settings);
    }

    #[test]
    fn adding_a_bill_closes_form_on_success() {
        let mut state = with_bills(vec![bill("1", BillStatus::Pending)]);
        press(&mut state, "a");
        assert_eq!(state.form.as_ref().unwrap().title(), "Add Bill");

        press(&mut state, "Gas");
        state.handle(AppAction::NextField);
        press(&mut state, "75,5");
        let mut dispatches = state.handle(AppAction::Submit);
        assert_eq!(dispatches.len(), 1);
        let dispatch = dispatches.remove(0);
        assert_eq!(dispatch.operation(), Operation::Create);
        assert!(state.handle(AppAction::Submit).is_empty());

        let Dispatch::Bills(pending) = dispatch else {
            panic!("expected a bills request");
        };
        let fields = BillFields {
            name: "Gas".to_string(),
            amount: MoneyCents::new(7550),
            ..bill("x", BillStatus::Pending).fields
        };
        let follow_up = state.settle(Settlement::Bills(
            pending.resolve(Ok(Response::Item(Record::new("2", fields)))),
        ));
        assert!(follow_up.is_empty());
        assert!(state.form.is_none());
        assert_eq!(state.toast.as_ref().unwrap().level, ToastLevel::Success);
        assert_eq!(state.store.bills.items().len(), 2);
        assert_eq!(state.store.bills.items()[1].amount, MoneyCents::new(7550));
    }

    #[test]
    fn failed_save_keeps_form_open() {
        let mut state = with_bills(vec![bill("1", BillStatus::Pending)]);
        press(&mut state, "e");
        assert_eq!(state.form.as_ref().unwrap().title(), "Edit Bill");

        let dispatch = state.handle(AppAction::Submit).remove(0);
        assert_eq!(dispatch.operation(), Operation::Update(EntityId::from("1")));
        state.settle(answer_bills(
            dispatch,
            Err(ApiError::Rejected {
                status: 400,
                message: "amount too large".to_string(),
            }),
        ));

        let form = state.form.as_ref().unwrap();
        assert_eq!(form.error.as_deref(), Some("400: amount too large"));
        assert!(form.awaiting.is_none());
        assert_eq!(state.handle(AppAction::Submit).len(), 1);
    }

    #[test]
    fn invalid_form_sends_nothing() {
        let mut state = with_bills(vec![]);
        press(&mut state, "a");
        assert!(state.handle(AppAction::Submit).is_empty());
        assert!(state.form.as_ref().unwrap().error.is_some());

        state.handle(AppAction::Cancel);
        assert!(state.form.is_none());
    }

    #[test]
    fn delete_requires_confirmation() {
        let mut state = with_bills(vec![bill("1", BillStatus::Pending), bill("2", BillStatus::Paid)]);
        state.handle(AppAction::Down);

        assert!(press(&mut state, "d").is_empty());
        assert_eq!(state.confirm.as_ref().unwrap().id, EntityId::from("2"));
        assert!(press(&mut state, "n").is_empty());
        assert!(state.confirm.is_none());

        press(&mut state, "d");
        let mut dispatches = press(&mut state, "y");
        let dispatch = dispatches.remove(0);
        assert_eq!(dispatch.operation(), Operation::Delete(EntityId::from("2")));

        state.settle(answer_bills(dispatch, Ok(Response::Removed)));
        assert_eq!(state.store.bills.items().len(), 1);
        assert_eq!(state.selected(Section::Bills), 0);
        assert_eq!(state.toast.as_ref().unwrap().message, "Deleted");
    }

    #[test]
    fn confirming_outside_a_record_section_sends_nothing() {
        for section in [Section::Dashboard, Section::Settings] {
            let mut state = with_bills(vec![bill("1", BillStatus::Pending)]);
            state.confirm = Some(Confirm {
                section,
                id: EntityId::from("1"),
                label: "Rent".to_string(),
            });
            assert!(press(&mut state, "y").is_empty());
            assert!(state.confirm.is_none());
            assert!(!state.store.is_loading());
            assert_eq!(state.store.bills.items().len(), 1);
        }
    }

    #[test]
    fn unpaid_filter_uses_the_secondary_view() {
        let mut state = with_bills(vec![bill("1", BillStatus::Pending), bill("2", BillStatus::Paid)]);
        let dispatch = press(&mut state, "u").remove(0);
        assert_eq!(dispatch.operation(), Operation::View(ViewKey::new("unpaid")));
        assert!(state.visible_bills().is_empty());

        state.settle(answer_bills(
            dispatch,
            Ok(Response::Items(vec![bill("1", BillStatus::Pending)])),
        ));
        assert_eq!(state.visible_bills().len(), 1);
        assert_eq!(state.store.bills.items().len(), 2);

        assert!(press(&mut state, "u").is_empty());
        assert_eq!(state.visible_bills().len(), 2);
    }

    #[test]
    fn save_refreshes_active_filtered_view() {
        let mut state = with_bills(vec![bill("1", BillStatus::Pending)]);
        let view = press(&mut state, "u").remove(0);
        state.settle(answer_bills(view, Ok(Response::Items(vec![]))));

        let dispatch = state.store.begin::<Bills>(Request::Update(
            EntityId::from("1"),
            bill("1", BillStatus::Paid).fields,
        ));
        let follow_up = state.settle(answer_bills(
            dispatch,
            Ok(Response::Item(bill("1", BillStatus::Paid))),
        ));
        assert_eq!(follow_up.len(), 1);
        assert_eq!(follow_up[0].operation(), Operation::View(ViewKey::new("unpaid")));
    }

    #[test]
    fn card_filter_cycles_through_cards() {
        let mut state = with_cards(vec![card("c1"), card("c2")]);

        let dispatch = press(&mut state, "c").remove(0);
        assert_eq!(dispatch.operation(), Operation::View(ViewKey::new("card/c1")));
        let dispatch = press(&mut state, "c").remove(0);
        assert_eq!(dispatch.operation(), Operation::View(ViewKey::new("card/c2")));
        assert!(press(&mut state, "c").is_empty());
        assert_eq!(state.card_filter, None);
    }

    #[test]
    fn q_types_inside_forms_and_quits_outside() {
        let mut state = with_cards(vec![card("c1")]);
        press(&mut state, "a");
        state.handle(AppAction::NextField);
        press(&mut state, "q");
        assert!(!state.should_quit);

        state.handle(AppAction::Cancel);
        press(&mut state, "q");
        assert!(state.should_quit);
    }

    #[test]
    fn settings_toggle_preferences() {
        let mut state = state();
        press(&mut state, "7");
        state.handle(AppAction::Submit);
        assert!(state.store.preferences.dark_mode);
        state.handle(AppAction::Down);
        state.handle(AppAction::Down);
        press(&mut state, " ");
        assert!(!state.store.preferences.bill_reminders);
        assert_eq!(state.toast.as_ref().unwrap().message, "Bill Reminders: off");
    }

    #[test]
    fn toast_expires_on_tick() {
        let mut state = state();
        state.notify(ToastLevel::Info, "hello");
        state.tick(Instant::now(), today());
        assert!(state.toast.is_some());
        state.tick(Instant::now() + TOAST_TTL, today());
        assert!(state.toast.is_none());
    }
}
