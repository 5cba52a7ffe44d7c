use std::fs;
use std::io;
use std::sync::mpsc;
use std::time::{Duration, Instant};

use anyhow::Result;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::layout::{Constraint, Direction, Layout};
use ratatui::prelude::*;
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{
    Bar, BarChart, BarGroup, Block, Borders, Clear, Gauge, Paragraph, Tabs, Wrap,
};

use athlete_terminal::auth::{AuthProvider, EnvAuth, User, require_user};
use athlete_terminal::config::{Config, SimMode, StoreKind};
use athlete_terminal::contracts::{Party, load_offers_for, sample_offers_for, save_offer};
use athlete_terminal::error::DashError;
use athlete_terminal::insights::{
    InsightLevel, RiskLevel, VitalsReading, bundle_insights, injury_risk, metric_progress,
    vitals_insights,
};
use athlete_terminal::logging;
use athlete_terminal::meals::{
    ADD_MEAL_FAILED, NutritionTargets, add_meal, daily_totals, list_meals, preset_meal,
    remove_meal,
};
use athlete_terminal::notifications::NotificationKind;
use athlete_terminal::persist::{Prefs, app_cache_dir, load_prefs, save_prefs};
use athlete_terminal::profile::{Priority, ProfileTable, Sport, Trend};
use athlete_terminal::roster::{Roster, RosterAthlete};
use athlete_terminal::scouting::export_scouting;
use athlete_terminal::simulator::{SimChannel, SimulatorSlot, build_source, comparison_fields};
use athlete_terminal::state::{AppState, Delta, Section, apply_delta};
use athlete_terminal::store::{DocumentStore, MemoryStore, open_store};
use athlete_terminal::user_profile::{
    AthleteProfile, RecruiterProfile, Role, UserProfile, fetch_profile, save_profile,
};

const MAX_COMPOSER_CHARS: usize = 280;

#[derive(Debug, Clone, Copy)]
enum OfferAction {
    Counter,
    Accept,
    Reject,
    Withdraw,
}

struct App {
    state: AppState,
    config: Config,
    store: Box<dyn DocumentStore>,
    auth: EnvAuth,
    tx: mpsc::Sender<Delta>,
    sims: SimulatorSlot,
    mounted: Option<Section>,
    meal_preset: usize,
    scout_sport: Option<String>,
    composer: Option<String>,
    should_quit: bool,
}

impl App {
    fn new(
        config: Config,
        store: Box<dyn DocumentStore>,
        auth: EnvAuth,
        tx: mpsc::Sender<Delta>,
    ) -> Self {
        let mut state = AppState::new(config.role, &config.sport, &config.position);
        if let Some(prefs) = load_prefs() {
            prefs.apply_to(&mut state);
        }
        Self {
            state,
            config,
            store,
            auth,
            tx,
            sims: SimulatorSlot::default(),
            mounted: None,
            meal_preset: 0,
            scout_sport: None,
            composer: None,
            should_quit: false,
        }
    }

    fn bootstrap(&mut self) {
        let user = self.auth.current_user();
        apply_delta(&mut self.state, Delta::SetUser(user.clone()));
        match user {
            Some(user) => {
                self.load_profile(&user);
                self.reload_meals(&user.id);
                self.load_offers(&user.id);
            }
            None => {
                self.state
                    .push_log("[WARN] Not signed in; set ATHLETE_USER_ID to log meals");
                self.seed_demo_offers();
            }
        }
        self.state.notifications.seed_demo();
        self.state.feed.seed_demo();
    }

    fn load_profile(&mut self, user: &User) {
        match fetch_profile(&*self.store, &user.id) {
            Ok(profile) => apply_delta(&mut self.state, Delta::SetProfile(profile)),
            Err(DashError::NotFound(_)) => {
                let profile = starter_profile(&self.state, user);
                match save_profile(&mut *self.store, &user.id, &profile) {
                    Ok(()) => {
                        self.state.push_log(format!(
                            "[INFO] Created starter profile for {}",
                            user.display_name
                        ));
                        apply_delta(&mut self.state, Delta::SetProfile(profile));
                    }
                    Err(err) => {
                        tracing::warn!(error = %err, user_id = %user.id, "starter profile not saved");
                        self.state
                            .push_log(format!("[WARN] Profile not saved: {err}"));
                    }
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, user_id = %user.id, "profile fetch failed");
                self.state
                    .push_log(format!("[WARN] Profile unavailable: {err}"));
            }
        }
    }

    fn reload_meals(&mut self, user_id: &str) {
        match list_meals(&*self.store, user_id, self.state.meal_date) {
            Ok(meals) => apply_delta(&mut self.state, Delta::SetMeals(meals)),
            Err(err) => {
                tracing::warn!(error = %err, "meal list failed");
                self.state.push_log(format!("[WARN] Meals unavailable: {err}"));
            }
        }
    }

    fn seed_demo_offers(&mut self) {
        let party = Party::for_role(self.state.role);
        let owner = match party {
            Party::Athlete => "demo-athlete",
            Party::Recruiter => "demo-recruiter",
        };
        apply_delta(
            &mut self.state,
            Delta::SetOffers(sample_offers_for(party, owner)),
        );
    }

    /// Offers seen from the side of the current role; seeds demo offers when empty.
    fn load_offers(&mut self, owner: &str) {
        let party = Party::for_role(self.state.role);
        let offers = match load_offers_for(&*self.store, party, owner) {
            Ok(offers) => offers,
            Err(err) => {
                tracing::warn!(error = %err, "offer list failed");
                self.state.push_log(format!("[WARN] Offers unavailable: {err}"));
                return;
            }
        };
        if !offers.is_empty() {
            apply_delta(&mut self.state, Delta::SetOffers(offers));
            return;
        }
        let seeded = sample_offers_for(party, owner);
        for offer in &seeded {
            if let Err(err) = save_offer(&mut *self.store, offer) {
                tracing::warn!(error = %err, offer_id = %offer.id, "sample offer not saved");
            }
        }
        apply_delta(&mut self.state, Delta::SetOffers(seeded));
    }

    /// Starts the simulator for the visible section, stopping the previous one.
    fn sync_mount(&mut self) {
        let section = self.state.section;
        if self.mounted == Some(section) {
            return;
        }
        let next = section.sim_channel().map(|channel| {
            (
                channel,
                build_source(channel, &self.state.bundle, self.config.sim_mode),
            )
        });
        self.sims.remount(next, self.config.sim_interval, &self.tx);
        self.mounted = Some(section);
        tracing::debug!(
            section = section.label(),
            channel = ?self.sims.active_channel(),
            "section mounted"
        );
    }

    fn shutdown(&mut self) {
        self.sims.unmount();
        if let Err(err) = save_prefs(&Prefs::from_state(&self.state)) {
            tracing::warn!(error = %err, "prefs not saved");
        }
    }

    fn on_key(&mut self, key: KeyEvent) {
        if self.composer.is_some() {
            self.on_composer_key(key);
            return;
        }
        match key.code {
            KeyCode::Char('q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::Right => self.state.cycle_section(true),
            KeyCode::BackTab | KeyCode::Left => self.state.cycle_section(false),
            KeyCode::Char('r') => {
                self.state.toggle_role();
                let role = self.state.role.label();
                self.state.push_log(format!("[INFO] Switched to {role} view"));
                match self.auth.current_user() {
                    Some(user) => self.load_offers(&user.id),
                    None => self.seed_demo_offers(),
                }
            }
            KeyCode::Char('j') | KeyCode::Down => {
                let len = self.list_len();
                self.state.select_next(len);
            }
            KeyCode::Char('k') | KeyCode::Up => self.state.select_prev(),
            KeyCode::Char('?') => self.state.help_overlay = !self.state.help_overlay,
            KeyCode::Esc => self.state.help_overlay = false,
            code => self.on_section_key(code),
        }
    }

    fn on_section_key(&mut self, code: KeyCode) {
        match (self.state.section, code) {
            (Section::Nutrition, KeyCode::Char('a')) => self.add_preset_meal(),
            (Section::Nutrition, KeyCode::Char('x')) => self.remove_selected_meal(),
            (Section::Recruitment | Section::Contracts, KeyCode::Char('c')) => {
                self.update_offer(OfferAction::Counter)
            }
            (Section::Recruitment | Section::Contracts, KeyCode::Char('y')) => {
                self.update_offer(OfferAction::Accept)
            }
            (Section::Recruitment | Section::Contracts, KeyCode::Char('n')) => {
                self.update_offer(OfferAction::Reject)
            }
            (Section::Recruitment | Section::Contracts, KeyCode::Char('w')) => {
                self.update_offer(OfferAction::Withdraw)
            }
            (Section::Notifications, KeyCode::Char('d')) => {
                if let Some(id) = self.state.notifications.id_at(self.state.selected) {
                    self.state.notifications.dismiss(id);
                    let len = self.state.notifications.len();
                    self.state.selected = self.state.selected.min(len.saturating_sub(1));
                }
            }
            (Section::Notifications, KeyCode::Char('m')) => {
                self.state.notifications.mark_all_read()
            }
            (Section::Notifications, KeyCode::Enter) => {
                if let Some(id) = self.state.notifications.id_at(self.state.selected) {
                    self.state.notifications.mark_read(id);
                }
            }
            (Section::Social | Section::Community, KeyCode::Char('l')) => self.like_selected(),
            (Section::Social | Section::Community, KeyCode::Char('p')) => {
                self.composer = Some(String::new())
            }
            (Section::Settings, KeyCode::Char('s')) => self.cycle_sport(),
            (Section::Settings, KeyCode::Char('o')) => self.cycle_position(),
            (Section::Settings, KeyCode::Char('x')) => self.sign_out(),
            (Section::Scouting, KeyCode::Char('e')) => self.export_scouting_board(),
            (Section::Scouting, KeyCode::Char('f')) => self.cycle_scout_filter(),
            _ => {}
        }
    }

    fn on_composer_key(&mut self, key: KeyEvent) {
        let Some(draft) = self.composer.as_mut() else {
            return;
        };
        match key.code {
            KeyCode::Esc => self.composer = None,
            KeyCode::Backspace => {
                draft.pop();
            }
            KeyCode::Enter => {
                let body = std::mem::take(draft);
                self.composer = None;
                let author = self
                    .state
                    .user
                    .as_ref()
                    .map(|u| u.display_name.clone())
                    .unwrap_or_else(|| "Guest".to_string());
                match self.state.feed.post(&author, &body) {
                    Ok(_) => {
                        self.state.selected = 0;
                        self.state.push_log("[INFO] Post published");
                    }
                    Err(err) => self.state.push_log(format!("[WARN] {err}")),
                }
            }
            KeyCode::Char(c) => {
                if draft.chars().count() < MAX_COMPOSER_CHARS {
                    draft.push(c);
                }
            }
            _ => {}
        }
    }

    fn list_len(&self) -> usize {
        match self.state.section {
            Section::Nutrition => self.state.meals.len(),
            Section::Recruitment | Section::Contracts => self.state.offers.len(),
            Section::Notifications => self.state.notifications.len(),
            Section::Social | Section::Community => self.state.feed.len(),
            Section::Scouting => Roster::builtin()
                .ranked(self.scout_sport.as_deref())
                .len(),
            Section::Training => self.state.bundle.recommendations.len(),
            _ => 0,
        }
    }

    fn add_preset_meal(&mut self) {
        let result = require_user(&self.auth).and_then(|user| {
            let meal = preset_meal(self.meal_preset, &user.id, self.state.meal_date);
            add_meal(&mut *self.store, meal)
        });
        match result {
            Ok(entry) => {
                self.meal_preset += 1;
                self.state
                    .push_log(format!("[INFO] Logged {}", entry.meal.name));
                apply_delta(&mut self.state, Delta::MealAdded(entry));
            }
            Err(err) => {
                tracing::warn!(error = %err, "add meal failed");
                self.state.push_log(format!("[WARN] {err}"));
                apply_delta(&mut self.state, Delta::MealError(ADD_MEAL_FAILED.to_string()));
            }
        }
    }

    fn remove_selected_meal(&mut self) {
        let Some(id) = self
            .state
            .meals
            .get(self.state.selected)
            .map(|m| m.id.clone())
        else {
            self.state.push_log("[INFO] No meal selected");
            return;
        };
        match remove_meal(&mut *self.store, &id) {
            Ok(()) => apply_delta(&mut self.state, Delta::MealRemoved(id)),
            Err(err) => {
                tracing::warn!(error = %err, meal_id = %id, "remove meal failed");
                self.state
                    .push_log(format!("[WARN] Meal not removed: {err}"));
            }
        }
    }

    fn update_offer(&mut self, action: OfferAction) {
        let party = Party::for_role(self.state.role);
        let Some(mut offer) = self.state.offers.get(self.state.selected).cloned() else {
            self.state.push_log("[INFO] No offer selected");
            return;
        };
        let result = match action {
            OfferAction::Counter => {
                let mut terms = offer.terms.clone();
                terms.salary = match party {
                    Party::Athlete => terms.salary.saturating_add(terms.salary / 10),
                    Party::Recruiter => terms.salary.saturating_add(terms.salary / 20),
                };
                offer.counter(party, terms)
            }
            OfferAction::Accept => offer.accept(party),
            OfferAction::Reject => offer.reject(party),
            OfferAction::Withdraw => offer.withdraw(party),
        };
        if let Err(err) = result {
            self.state.push_log(format!("[WARN] {err}"));
            return;
        }
        if let Err(err) = save_offer(&mut *self.store, &offer) {
            tracing::warn!(error = %err, offer_id = %offer.id, "offer not saved");
            self.state.push_log(format!("[WARN] Offer not saved: {err}"));
        }
        let title = format!(
            "{} offer {}",
            offer.athlete,
            offer.status.label().to_lowercase()
        );
        let body = format!(
            "${} x {}y, total ${}",
            offer.terms.salary,
            offer.terms.duration_years,
            offer.terms.total_value()
        );
        apply_delta(&mut self.state, Delta::UpsertOffer(offer));
        apply_delta(
            &mut self.state,
            Delta::Notify {
                kind: NotificationKind::Offer,
                title,
                body,
            },
        );
    }

    fn like_selected(&mut self) {
        let Some(post_id) = self
            .state
            .feed
            .recent(self.state.selected + 1)
            .get(self.state.selected)
            .map(|p| p.id)
        else {
            return;
        };
        let liker = self
            .state
            .user
            .as_ref()
            .map(|u| u.id.clone())
            .unwrap_or_else(|| "guest".to_string());
        match self.state.feed.toggle_like(post_id, &liker) {
            Ok(likes) => self
                .state
                .push_log(format!("[INFO] Post {post_id} has {likes} likes")),
            Err(err) => self.state.push_log(format!("[WARN] {err}")),
        }
    }

    fn cycle_sport(&mut self) {
        let table = ProfileTable::active();
        let sports = table.sports();
        if sports.is_empty() {
            return;
        }
        let next = Sport::parse(&self.state.sport)
            .and_then(|current| sports.iter().position(|s| *s == current))
            .map(|idx| (idx + 1) % sports.len())
            .unwrap_or(0);
        let sport = sports[next];
        let position = table
            .positions_for(sport.label())
            .first()
            .cloned()
            .unwrap_or_default();
        self.set_profile_key(sport.label(), &position);
    }

    fn cycle_position(&mut self) {
        let positions = ProfileTable::active().positions_for(&self.state.sport);
        if positions.is_empty() {
            return;
        }
        let next = positions
            .iter()
            .position(|p| p.eq_ignore_ascii_case(&self.state.position))
            .map(|idx| (idx + 1) % positions.len())
            .unwrap_or(0);
        let sport = self.state.sport.clone();
        self.set_profile_key(&sport, &positions[next]);
    }

    fn set_profile_key(&mut self, sport: &str, position: &str) {
        self.state.set_profile_key(sport, position);
        self.state
            .push_log(format!("[INFO] Profile set to {sport} / {position}"));
        self.mounted = None;

        let Some(user_id) = self.state.user.as_ref().map(|u| u.id.clone()) else {
            return;
        };
        let Some(UserProfile::Athlete(athlete)) = self.state.profile.as_mut() else {
            return;
        };
        athlete.sport = self.state.sport.clone();
        athlete.position = self.state.position.clone();
        let profile = UserProfile::Athlete(athlete.clone());
        if let Err(err) = save_profile(&mut *self.store, &user_id, &profile) {
            tracing::warn!(error = %err, "profile not saved");
            self.state.push_log(format!("[WARN] Profile not saved: {err}"));
        }
    }

    fn sign_out(&mut self) {
        if self.state.user.is_none() {
            self.state.push_log("[INFO] Already signed out");
            return;
        }
        self.auth.sign_out();
        apply_delta(&mut self.state, Delta::SetUser(None));
        self.state.push_log("[INFO] Signed out");
    }

    fn cycle_scout_filter(&mut self) {
        let sports = Roster::builtin().sports();
        self.scout_sport = match &self.scout_sport {
            None => sports.first().cloned(),
            Some(current) => sports
                .iter()
                .position(|s| s == current)
                .and_then(|idx| sports.get(idx + 1))
                .cloned(),
        };
        self.state.selected = 0;
    }

    fn export_scouting_board(&mut self) {
        let Some(dir) = app_cache_dir() else {
            self.state
                .push_log("[WARN] No cache directory for scouting export");
            return;
        };
        if let Err(err) = fs::create_dir_all(&dir) {
            self.state.push_log(format!("[WARN] Export failed: {err}"));
            return;
        }
        let path = dir.join("scouting.xlsx");
        let athletes = Roster::builtin().ranked(self.scout_sport.as_deref());
        match export_scouting(&path, &athletes) {
            Ok(report) => apply_delta(
                &mut self.state,
                Delta::Notify {
                    kind: NotificationKind::Scouting,
                    title: "Scouting export ready".to_string(),
                    body: format!(
                        "{} athletes, {} awards -> {}",
                        report.athletes,
                        report.awards,
                        path.display()
                    ),
                },
            ),
            Err(err) => {
                tracing::warn!(error = %err, "scouting export failed");
                self.state.push_log(format!("[WARN] Export failed: {err}"));
            }
        }
    }
}

fn starter_profile(state: &AppState, user: &User) -> UserProfile {
    match state.role {
        Role::Athlete => UserProfile::Athlete(AthleteProfile {
            display_name: user.display_name.clone(),
            sport: state.sport.clone(),
            position: state.position.clone(),
            age: None,
            height_cm: None,
            weight_kg: None,
            school: None,
            graduation_year: None,
            gpa: None,
            highlights_url: None,
            awards: Vec::new(),
        }),
        Role::Recruiter => UserProfile::Recruiter(RecruiterProfile {
            display_name: user.display_name.clone(),
            organization: "Independent".to_string(),
            title: None,
            sports: vec![state.sport.clone()],
            regions: Vec::new(),
            verified: false,
        }),
    }
}

fn main() -> Result<()> {
    let config = Config::from_env();
    let log_path = app_cache_dir().map(|dir| dir.join("athlete_terminal.log"));
    logging::init(log_path.as_deref())?;

    let mut notes = Vec::new();
    if let Some(path) = &config.profiles_path {
        match ProfileTable::load(path) {
            Ok(table) => {
                let pairs = table.len();
                if ProfileTable::install(table) {
                    tracing::info!(path = %path.display(), pairs, "profile table loaded");
                }
            }
            Err(err) => {
                tracing::warn!(error = %err, "profile table rejected; using builtin");
                notes.push(format!("[WARN] Profiles file rejected: {err}"));
            }
        }
    }

    let store = match open_store(&config) {
        Ok(store) => store,
        Err(err) => {
            tracing::warn!(error = %err, "document store unavailable; using memory store");
            notes.push(format!("[WARN] Store unavailable, data is not saved: {err}"));
            Box::new(MemoryStore::new()) as Box<dyn DocumentStore>
        }
    };
    let auth = EnvAuth::from_config(&config);

    let (tx, rx) = mpsc::channel();
    let mut app = App::new(config, store, auth, tx);
    for note in notes {
        app.state.push_log(note);
    }
    app.bootstrap();

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = ratatui::backend::CrosstermBackend::new(stdout);
    let mut terminal = ratatui::Terminal::new(backend)?;

    let res = run_app(&mut terminal, &mut app, rx);
    app.shutdown();

    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    if let Err(err) = res {
        tracing::error!(error = %err, "terminal loop failed");
        eprintln!("error: {err}");
    }
    Ok(())
}

fn run_app<B: Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    rx: mpsc::Receiver<Delta>,
) -> io::Result<()> {
    let tick_rate = Duration::from_millis(250);
    let mut last_tick = Instant::now();

    loop {
        while let Ok(delta) = rx.try_recv() {
            apply_delta(&mut app.state, delta);
        }

        app.sync_mount();

        terminal.draw(|f| ui(f, app))?;

        let timeout = tick_rate
            .checked_sub(last_tick.elapsed())
            .unwrap_or(Duration::ZERO);
        if event::poll(timeout)? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    app.on_key(key);
                }
            }
        }

        if last_tick.elapsed() >= tick_rate {
            last_tick = Instant::now();
        }

        if app.should_quit {
            return Ok(());
        }
    }
}

fn ui(frame: &mut Frame, app: &App) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Min(1),
            Constraint::Length(5),
            Constraint::Length(2),
        ])
        .split(frame.size());

    render_header(frame, chunks[0], &app.state);

    let state = &app.state;
    let body = chunks[1];
    match state.section {
        Section::Overview => render_overview(frame, body, state),
        Section::Training => render_training(frame, body, state),
        Section::Nutrition => render_nutrition(frame, body, state),
        Section::Injury => render_injury(frame, body, state),
        Section::Recruitment => render_recruitment(frame, body, state),
        Section::Social | Section::Community => {
            render_feed(frame, body, state, app.composer.as_deref())
        }
        Section::Settings => render_settings(frame, body, app),
        Section::AiInsights => render_ai_insights(frame, body, state),
        Section::LiveComparison => render_comparison(frame, body, state),
        Section::Scouting => render_scouting(frame, body, state, app.scout_sport.as_deref()),
        Section::Contracts => render_contracts(frame, body, state),
        Section::Notifications => render_notifications(frame, body, state),
    }

    let console = Paragraph::new(console_text(state))
        .block(Block::default().title("Console").borders(Borders::ALL));
    frame.render_widget(console, chunks[2]);

    let footer = Paragraph::new(footer_text(state))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(footer, chunks[3]);

    if state.help_overlay {
        render_help_overlay(frame, frame.size());
    }
}

fn render_header(frame: &mut Frame, area: Rect, state: &AppState) {
    let sections = state.sections();
    let selected = sections
        .iter()
        .position(|s| *s == state.section)
        .unwrap_or(0);
    let user = state
        .user
        .as_ref()
        .map(|u| u.display_name.as_str())
        .unwrap_or("signed out");
    let title = format!(
        " {} | {} / {} | {} ",
        state.role.label(),
        state.sport,
        state.position,
        user
    );
    let unread = state.notifications.unread_count();
    let title = if unread > 0 {
        format!("{title}| {unread} unread ")
    } else {
        title
    };
    let tabs = Tabs::new(sections.iter().map(|s| s.label()).collect::<Vec<_>>())
        .select(selected)
        .block(Block::default().title(title).borders(Borders::ALL))
        .highlight_style(
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )
        .divider("|");
    frame.render_widget(tabs, area);
}

fn footer_text(state: &AppState) -> String {
    let common = "tab/←/→ Section | r Role | ? Help | q Quit";
    let local = match state.section {
        Section::Nutrition => "a Add meal | x Remove | j/k Move",
        Section::Recruitment | Section::Contracts => {
            "c Counter | y Accept | n Reject | w Withdraw | j/k Move"
        }
        Section::Notifications => "Enter Read | m Read all | d Dismiss | j/k Move",
        Section::Social | Section::Community => "l Like | p Post | j/k Move",
        Section::Settings => "s Sport | o Position | x Sign out",
        Section::Scouting => "f Filter | e Export xlsx | j/k Move",
        Section::Training => "j/k Move",
        _ => "",
    };
    if local.is_empty() {
        common.to_string()
    } else {
        format!("{local} | {common}")
    }
}

struct GaugeRow {
    label: String,
    percent: f32,
    color: Color,
}

fn render_gauges(frame: &mut Frame, area: Rect, title: &str, rows: &[GaugeRow]) {
    let block = Block::default().title(title).borders(Borders::ALL);
    let inner = block.inner(area);
    frame.render_widget(block, area);
    if rows.is_empty() {
        frame.render_widget(Paragraph::new("No data for this profile"), inner);
        return;
    }

    let mut constraints: Vec<Constraint> = rows.iter().map(|_| Constraint::Length(2)).collect();
    constraints.push(Constraint::Min(0));
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints(constraints)
        .split(inner);

    for (row, chunk) in rows.iter().zip(chunks.iter()) {
        let bar_area = Rect {
            height: chunk.height.min(1),
            ..*chunk
        };
        let gauge = Gauge::default()
            .gauge_style(Style::default().fg(row.color).bg(Color::Black))
            .percent(row.percent.clamp(0.0, 100.0).round() as u16)
            .label(row.label.clone());
        frame.render_widget(gauge, bar_area);
    }
}

fn vitals_reading(state: &AppState) -> VitalsReading {
    state
        .snapshot(SimChannel::Vitals)
        .map(VitalsReading::from_snapshot)
        .unwrap_or_default()
}

fn vital_rows(v: &VitalsReading) -> Vec<GaugeRow> {
    let pct = |name: &str, value: f32, color: Color| GaugeRow {
        label: format!("{name} {value:.0}%"),
        percent: value,
        color,
    };
    vec![
        GaugeRow {
            label: format!("Heart Rate {:.0} bpm", v.heart_rate),
            percent: (v.heart_rate - 40.0) / 160.0 * 100.0,
            color: Color::Red,
        },
        pct("Hydration", v.hydration, Color::Cyan),
        pct("Fatigue", v.fatigue, Color::Yellow),
        pct("Sleep Quality", v.sleep_quality, Color::Blue),
        pct("Soreness", v.soreness, Color::Magenta),
        pct("Training Load", v.training_load, Color::Green),
    ]
}

fn trend_arrow(trend: Trend) -> &'static str {
    match trend {
        Trend::Up => "↑",
        Trend::Down => "↓",
        Trend::Stable => "→",
    }
}

fn render_overview(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    render_gauges(frame, cols[0], "Live Vitals", &vital_rows(&vitals_reading(state)));

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(cols[1]);

    let metric_rows: Vec<GaugeRow> = state
        .bundle
        .metrics
        .iter()
        .map(|m| GaugeRow {
            label: format!(
                "{} {:.0}/{:.0} {} +{:.1}/wk",
                m.category,
                m.current,
                m.target,
                trend_arrow(m.trend),
                m.improvement_rate
            ),
            percent: metric_progress(m),
            color: Color::Green,
        })
        .collect();
    render_gauges(frame, right[0], "Development", &metric_rows);

    let lines: Vec<Line> = if state.bundle.insights.is_empty() {
        vec![Line::from("No performance insights")]
    } else {
        state
            .bundle
            .insights
            .iter()
            .flat_map(|i| {
                [
                    Line::from(Span::styled(
                        format!(
                            "{} {} ({:+.1}%) {}",
                            i.metric,
                            i.value,
                            i.change,
                            trend_arrow(i.trend)
                        ),
                        Style::default().add_modifier(Modifier::BOLD),
                    )),
                    Line::from(format!("  {}", i.recommendation)),
                ]
            })
            .collect()
    };
    let insights = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Performance Insights").borders(Borders::ALL));
    frame.render_widget(insights, right[1]);
}

fn render_training(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);

    let live = state.snapshot(SimChannel::Performance);
    let rows: Vec<GaugeRow> = state
        .bundle
        .metrics
        .iter()
        .map(|m| {
            let current = live
                .and_then(|snap| snap.get(&m.category))
                .unwrap_or(m.current);
            let percent = if m.target > 0.0 {
                current / m.target * 100.0
            } else {
                100.0
            };
            GaugeRow {
                label: format!("{} {:.1} / {:.0}", m.category, current, m.target),
                percent,
                color: if current >= m.target {
                    Color::Green
                } else {
                    Color::Yellow
                },
            }
        })
        .collect();
    render_gauges(frame, cols[0], "Live Session", &rows);

    let right = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(cols[1]);

    let items: Vec<(String, Style)> = state
        .bundle
        .recommendations
        .iter()
        .map(|r| {
            (
                format!(
                    "[{}] {} ({}) impact {}: {}",
                    priority_label(r.priority),
                    r.title,
                    r.kind,
                    r.impact_score,
                    r.description
                ),
                Style::default().fg(priority_color(r.priority)),
            )
        })
        .collect();
    let recs = Paragraph::new(list_lines(items, state.selected, visible_rows(right[0])))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Recommendations").borders(Borders::ALL));
    frame.render_widget(recs, right[0]);

    render_recovery(frame, right[1], state);
}

fn priority_label(priority: Priority) -> &'static str {
    match priority {
        Priority::High => "HIGH",
        Priority::Medium => "MED",
        Priority::Low => "LOW",
    }
}

fn priority_color(priority: Priority) -> Color {
    match priority {
        Priority::High => Color::Red,
        Priority::Medium => Color::Yellow,
        Priority::Low => Color::Gray,
    }
}

fn render_recovery(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut lines = Vec::new();
    for plan in &state.bundle.recovery {
        lines.push(Line::from(Span::styled(
            format!("{} ({})", plan.kind, plan.duration),
            Style::default().add_modifier(Modifier::BOLD),
        )));
        lines.push(Line::from(format!("  {}", plan.description)));
        if !plan.benefits.is_empty() {
            lines.push(Line::from(format!("  + {}", plan.benefits.join(", "))));
        }
    }
    if lines.is_empty() {
        lines.push(Line::from("No recovery plans"));
    }
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Recovery").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_nutrition(frame: &mut Frame, area: Rect, state: &AppState) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(area);
    let top = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(rows[0]);

    let items: Vec<(String, Style)> = state
        .meals
        .iter()
        .map(|m| {
            (
                format!(
                    "{:<9} {} {} kcal  P{:.0} C{:.0} F{:.0}",
                    m.meal.meal_type.label(),
                    m.meal.name,
                    m.meal.calories,
                    m.meal.protein,
                    m.meal.carbs,
                    m.meal.fats
                ),
                Style::default(),
            )
        })
        .collect();
    let mut lines = if items.is_empty() {
        vec![Line::from("No meals logged today. Press a to add one.")]
    } else {
        list_lines(items, state.selected, visible_rows(top[0]).saturating_sub(1))
    };
    if let Some(err) = &state.meal_error {
        lines.push(Line::from(Span::styled(
            err.clone(),
            Style::default().fg(Color::Red),
        )));
    }
    let log = Paragraph::new(lines).block(
        Block::default()
            .title(format!("Meal Log {}", state.meal_date.format("%Y-%m-%d")))
            .borders(Borders::ALL),
    );
    frame.render_widget(log, top[0]);

    let totals = daily_totals(&state.meals);
    let targets = NutritionTargets::for_sport(Sport::parse(&state.sport));
    let progress = targets.progress(&totals);
    let macro_rows = vec![
        GaugeRow {
            label: format!("Calories {} / {}", totals.calories, targets.calories),
            percent: progress.calories,
            color: Color::Yellow,
        },
        GaugeRow {
            label: format!("Protein {:.0}g / {:.0}g", totals.protein, targets.protein),
            percent: progress.protein,
            color: Color::Red,
        },
        GaugeRow {
            label: format!("Carbs {:.0}g / {:.0}g", totals.carbs, targets.carbs),
            percent: progress.carbs,
            color: Color::Cyan,
        },
        GaugeRow {
            label: format!("Fats {:.0}g / {:.0}g", totals.fats, targets.fats),
            percent: progress.fats,
            color: Color::Magenta,
        },
    ];
    render_gauges(frame, top[1], "Daily Targets", &macro_rows);

    let plan_lines: Vec<Line> = if state.bundle.meal_plan.is_empty() {
        vec![Line::from("No meal plan for this profile")]
    } else {
        state
            .bundle
            .meal_plan
            .iter()
            .map(|day| {
                let (summed, _) = day.annotated_calories();
                let text = format!(
                    "{:<9} {} | {} | {}  = {} kcal",
                    day.day, day.meals[0], day.meals[1], day.meals[2], day.total_calories
                );
                if summed != day.total_calories {
                    Line::from(vec![
                        Span::raw(text),
                        Span::styled(
                            format!("  (meals sum to {summed})"),
                            Style::default().fg(Color::Yellow),
                        ),
                    ])
                } else {
                    Line::from(text)
                }
            })
            .collect()
    };
    let plan = Paragraph::new(plan_lines)
        .wrap(Wrap { trim: false })
        .block(Block::default().title("Weekly Meal Plan").borders(Borders::ALL));
    frame.render_widget(plan, rows[1]);
}

fn render_injury(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(area);
    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(1)])
        .split(cols[0]);

    let vitals = vitals_reading(state);
    let risk = injury_risk(&vitals);
    let color = match risk.level {
        RiskLevel::Low => Color::Green,
        RiskLevel::Moderate => Color::Yellow,
        RiskLevel::High => Color::Red,
    };
    let gauge = Gauge::default()
        .block(Block::default().title("Injury Risk").borders(Borders::ALL))
        .gauge_style(Style::default().fg(color).bg(Color::Black))
        .percent(u16::from(risk.score.min(100)))
        .label(format!("{} ({})", risk.score, risk.level.label()));
    frame.render_widget(gauge, left[0]);

    let mut lines = vec![Line::from(format!(
        "Fatigue {:.0}%  Soreness {:.0}%  Load {:.0}%",
        vitals.fatigue, vitals.soreness, vitals.training_load
    ))];
    if risk.factors.is_empty() {
        lines.push(Line::from(Span::styled(
            "No risk factors flagged",
            Style::default().fg(Color::Green),
        )));
    } else {
        for factor in &risk.factors {
            lines.push(Line::from(Span::styled(
                format!("! {factor}"),
                Style::default().fg(color),
            )));
        }
    }
    let factors = Paragraph::new(lines)
        .block(Block::default().title("Risk Factors").borders(Borders::ALL));
    frame.render_widget(factors, left[1]);

    render_recovery(frame, cols[1], state);
}

fn render_recruitment(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(40), Constraint::Percentage(60)])
        .split(area);

    let card = Paragraph::new(profile_lines(state))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Recruiting Profile").borders(Borders::ALL));
    frame.render_widget(card, cols[0]);

    render_offer_list(frame, cols[1], state, "Offers");
}

fn profile_lines(state: &AppState) -> Vec<Line<'static>> {
    match &state.profile {
        Some(UserProfile::Athlete(p)) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    p.display_name.clone(),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("{} / {}", p.sport, p.position)),
            ];
            let optional = [
                ("Age", p.age.map(|v| v.to_string())),
                ("Height", p.height_cm.map(|v| format!("{v} cm"))),
                ("Weight", p.weight_kg.map(|v| format!("{v:.1} kg"))),
                ("School", p.school.clone()),
                ("Class of", p.graduation_year.map(|v| v.to_string())),
                ("GPA", p.gpa.map(|v| format!("{v:.2}"))),
                ("Highlights", p.highlights_url.clone()),
            ];
            for (label, value) in optional {
                if let Some(value) = value {
                    lines.push(Line::from(format!("{label}: {value}")));
                }
            }
            for award in &p.awards {
                lines.push(Line::from(format!("* {award}")));
            }
            lines
        }
        Some(UserProfile::Recruiter(p)) => vec![
            Line::from(Span::styled(
                p.display_name.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            )),
            Line::from(format!(
                "{}{}",
                p.organization,
                p.title
                    .as_ref()
                    .map(|t| format!(" ({t})"))
                    .unwrap_or_default()
            )),
            Line::from(format!("Sports: {}", p.sports.join(", "))),
            Line::from(if p.verified { "Verified" } else { "Unverified" }),
        ],
        None => vec![Line::from("No profile loaded")],
    }
}

fn render_offer_list(frame: &mut Frame, area: Rect, state: &AppState, title: &str) {
    let party = Party::for_role(state.role);
    let items: Vec<(String, Style)> = state
        .offers
        .iter()
        .map(|o| {
            let style = if o.status.is_closed() {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default()
            };
            (
                format!(
                    "{:<10} {:<16} ${}/yr x {}y  +${}",
                    o.status.label(),
                    o.counterpart(party),
                    o.terms.salary,
                    o.terms.duration_years,
                    o.terms.signing_bonus
                ),
                style,
            )
        })
        .collect();
    let lines = if items.is_empty() {
        vec![Line::from("No offers")]
    } else {
        list_lines(items, state.selected, visible_rows(area))
    };
    let list = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn render_contracts(frame: &mut Frame, area: Rect, state: &AppState) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
        .split(area);
    render_offer_list(frame, cols[0], state, "Contract Management");

    let lines: Vec<Line> = match state.offers.get(state.selected) {
        Some(offer) => {
            let mut lines = vec![
                Line::from(Span::styled(
                    format!("{} <- {}", offer.athlete, offer.recruiter),
                    Style::default().add_modifier(Modifier::BOLD),
                )),
                Line::from(format!("Total value ${}", offer.terms.total_value())),
            ];
            if !offer.terms.incentives.is_empty() {
                lines.push(Line::from(format!(
                    "Incentives: {}",
                    offer.terms.incentives.join(", ")
                )));
            }
            lines.push(Line::from(""));
            for event in &offer.history {
                lines.push(Line::from(format!(
                    "{} {:?} {} ${}",
                    event.at.format("%m-%d %H:%M"),
                    event.by,
                    event.status.label(),
                    event.terms.salary
                )));
            }
            lines
        }
        None => vec![Line::from("No offer selected")],
    };
    let detail = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("History").borders(Borders::ALL));
    frame.render_widget(detail, cols[1]);
}

fn render_feed(frame: &mut Frame, area: Rect, state: &AppState, composer: Option<&str>) {
    let rows = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(3)])
        .split(area);

    let viewer = state.user.as_ref().map(|u| u.id.as_str()).unwrap_or("guest");
    let items: Vec<(String, Style)> = state
        .feed
        .recent(state.feed.len())
        .into_iter()
        .map(|p| {
            let heart = if p.liked_by(viewer) { "♥" } else { "♡" };
            (
                format!("{} {} {}: {}", heart, p.likes(), p.author, p.body),
                Style::default(),
            )
        })
        .collect();
    let lines = if items.is_empty() {
        vec![Line::from("No posts yet")]
    } else {
        list_lines(items, state.selected, visible_rows(rows[0]))
    };
    let feed = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title(state.section.label()).borders(Borders::ALL));
    frame.render_widget(feed, rows[0]);

    let (text, style) = match composer {
        Some(draft) => (format!("{draft}_"), Style::default().fg(Color::Yellow)),
        None => ("Press p to write a post".to_string(), Style::default().fg(Color::DarkGray)),
    };
    let input = Paragraph::new(text)
        .style(style)
        .block(Block::default().title("New Post").borders(Borders::ALL));
    frame.render_widget(input, rows[1]);
}

fn render_settings(frame: &mut Frame, area: Rect, app: &App) {
    let state = &app.state;
    let table = ProfileTable::active();
    let user_lines = match &state.user {
        Some(user) => vec![
            format!("User: {} ({})", user.display_name, user.id),
            format!("Email: {}", user.email),
            format!(
                "Photo: {}",
                user.photo_url.as_deref().unwrap_or("none")
            ),
        ],
        None => vec!["Signed out".to_string()],
    };
    let store_label = match app.config.store {
        StoreKind::Memory => "memory".to_string(),
        StoreKind::Sqlite => app
            .config
            .resolved_db_path()
            .map(|p| format!("sqlite ({})", p.display()))
            .unwrap_or_else(|| "sqlite".to_string()),
    };
    let sim_label = match app.config.sim_mode {
        SimMode::Jitter => "jitter",
        SimMode::Replay => "replay",
    };
    let mut lines: Vec<Line> = user_lines.into_iter().map(Line::from).collect();
    lines.push(Line::from(""));
    lines.push(Line::from(format!("Sport: {}", state.sport)));
    lines.push(Line::from(format!(
        "Position: {}  (available: {})",
        state.position,
        table.positions_for(&state.sport).join(", ")
    )));
    lines.push(Line::from(format!(
        "Profiles loaded: {} pairs across {} sports",
        table.len(),
        table.sports().len()
    )));
    lines.push(Line::from(format!(
        "Simulator: {} every {} ms",
        sim_label,
        app.config.sim_interval.as_millis()
    )));
    lines.push(Line::from(format!("Store: {store_label}")));

    let settings = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Settings").borders(Borders::ALL));
    frame.render_widget(settings, area);
}

fn render_ai_insights(frame: &mut Frame, area: Rect, state: &AppState) {
    let mut insights = vitals_insights(&vitals_reading(state));
    insights.extend(bundle_insights(&state.bundle));
    insights.sort_by_key(|i| i.level);

    let mut lines = Vec::new();
    for insight in &insights {
        let (tag, color) = match insight.level {
            InsightLevel::Alert => ("ALERT", Color::Red),
            InsightLevel::Warning => ("WARN", Color::Yellow),
            InsightLevel::Info => ("INFO", Color::Cyan),
            InsightLevel::Positive => ("GOOD", Color::Green),
        };
        lines.push(Line::from(vec![
            Span::styled(format!("[{tag}] "), Style::default().fg(color)),
            Span::styled(
                insight.title.clone(),
                Style::default().add_modifier(Modifier::BOLD),
            ),
        ]));
        lines.push(Line::from(format!("  {}", insight.message)));
    }
    let paragraph = Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .block(Block::default().title("AI Insights").borders(Borders::ALL));
    frame.render_widget(paragraph, area);
}

fn render_comparison(frame: &mut Frame, area: Rect, state: &AppState) {
    let baseline = comparison_fields();
    let value = |name: &str| -> u64 {
        state
            .snapshot(SimChannel::Comparison)
            .and_then(|snap| snap.get(name))
            .or_else(|| baseline.iter().find(|f| f.name() == name).map(|f| f.value()))
            .unwrap_or(0.0)
            .round() as u64
    };

    let mut chart = BarChart::default()
        .block(Block::default().title("Live Comparison").borders(Borders::ALL))
        .bar_width(6)
        .bar_gap(1)
        .group_gap(4)
        .max(100);
    for attribute in ["Speed", "Endurance", "Technique"] {
        let you = Bar::default()
            .value(value(&format!("You: {attribute}")))
            .label(Line::from("You"))
            .style(Style::default().fg(Color::Green));
        let peers = Bar::default()
            .value(value(&format!("Peers: {attribute}")))
            .label(Line::from("Peers"))
            .style(Style::default().fg(Color::Blue));
        chart = chart.data(
            BarGroup::default()
                .label(Line::from(attribute))
                .bars(&[you, peers]),
        );
    }
    frame.render_widget(chart, area);
}

fn render_scouting(frame: &mut Frame, area: Rect, state: &AppState, filter: Option<&str>) {
    let cols = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
        .split(area);

    let athletes = Roster::builtin().ranked(filter);
    let items: Vec<(String, Style)> = athletes
        .iter()
        .enumerate()
        .map(|(idx, a)| {
            (
                format!(
                    "{:>2}. {:<20} {:<18} {:<16} {:>2}y  {} awards",
                    idx + 1,
                    a.name,
                    a.sport,
                    a.position,
                    a.age,
                    a.awards.len()
                ),
                Style::default(),
            )
        })
        .collect();
    let title = format!("Global Scouting | {}", filter.unwrap_or("All sports"));
    let lines = if items.is_empty() {
        vec![Line::from("No athletes for this filter")]
    } else {
        list_lines(items, state.selected, visible_rows(cols[0]))
    };
    let list = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, cols[0]);

    let detail = Paragraph::new(athlete_detail(athletes.get(state.selected).copied()))
        .wrap(Wrap { trim: true })
        .block(Block::default().title("Athlete").borders(Borders::ALL));
    frame.render_widget(detail, cols[1]);
}

fn athlete_detail(athlete: Option<&RosterAthlete>) -> Vec<Line<'static>> {
    let Some(a) = athlete else {
        return vec![Line::from("No athlete selected")];
    };
    let mut lines = vec![
        Line::from(Span::styled(
            a.name.clone(),
            Style::default().add_modifier(Modifier::BOLD),
        )),
        Line::from(format!("{} / {} / age {}", a.sport, a.position, a.age)),
        Line::from(a.image_url.clone()),
        Line::from(""),
    ];
    if a.awards.is_empty() {
        lines.push(Line::from("No awards yet"));
    }
    for award in &a.awards {
        lines.push(Line::from(format!("* {award}")));
    }
    lines
}

fn render_notifications(frame: &mut Frame, area: Rect, state: &AppState) {
    let items: Vec<(String, Style)> = state
        .notifications
        .items()
        .map(|n| {
            let style = if n.read {
                Style::default().fg(Color::DarkGray)
            } else {
                Style::default().add_modifier(Modifier::BOLD)
            };
            (
                format!(
                    "{} {:<5} {} {}: {}",
                    if n.read { " " } else { "•" },
                    n.kind.label(),
                    n.created_at.format("%H:%M"),
                    n.title,
                    n.body
                ),
                style,
            )
        })
        .collect();
    let lines = if items.is_empty() {
        vec![Line::from("No notifications")]
    } else {
        list_lines(items, state.selected, visible_rows(area))
    };
    let title = format!("Notifications ({} unread)", state.notifications.unread_count());
    let list = Paragraph::new(lines).block(Block::default().title(title).borders(Borders::ALL));
    frame.render_widget(list, area);
}

fn list_lines(items: Vec<(String, Style)>, selected: usize, visible: usize) -> Vec<Line<'static>> {
    let (start, end) = visible_range(selected, items.len(), visible.max(1));
    items
        .into_iter()
        .enumerate()
        .skip(start)
        .take(end - start)
        .map(|(idx, (text, style))| {
            let style = if idx == selected {
                style.bg(Color::DarkGray)
            } else {
                style
            };
            Line::from(Span::styled(text, style))
        })
        .collect()
}

fn visible_rows(area: Rect) -> usize {
    area.height.saturating_sub(2) as usize
}

fn visible_range(selected: usize, total: usize, visible: usize) -> (usize, usize) {
    if total == 0 {
        return (0, 0);
    }
    if total <= visible {
        return (0, total);
    }

    let mut start = selected.saturating_sub(visible / 2);
    if start + visible > total {
        start = total - visible;
    }
    (start, start + visible)
}

fn console_text(state: &AppState) -> String {
    if state.logs.is_empty() {
        return "No alerts yet".to_string();
    }
    let mut recent: Vec<&str> = state.logs.iter().rev().take(3).map(String::as_str).collect();
    recent.reverse();
    recent.join("\n")
}

fn render_help_overlay(frame: &mut Frame, area: Rect) {
    let popup_area = centered_rect(60, 70, area);
    frame.render_widget(Clear, popup_area);

    let text = [
        "Athlete Terminal - Help",
        "",
        "Global:",
        "  tab / ←/→    Switch section",
        "  r            Toggle athlete / recruiter",
        "  j/k or ↑/↓   Move selection",
        "  ?            Toggle help",
        "  q            Quit",
        "",
        "Nutrition:      a add sample meal, x remove",
        "Offers:         c counter, y accept, n reject, w withdraw",
        "Notifications:  Enter read, m read all, d dismiss",
        "Social:         l like, p post (Enter send, Esc cancel)",
        "Scouting:       f sport filter, e export xlsx",
        "Settings:       s sport, o position, x sign out",
    ]
    .join("\n");

    let help = Paragraph::new(text)
        .block(Block::default().title("Help").borders(Borders::ALL))
        .style(Style::default());
    frame.render_widget(help, popup_area);
}

fn centered_rect(percent_x: u16, percent_y: u16, area: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(area);

    let horizontal = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1]);

    horizontal[1]
}
