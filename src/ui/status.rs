use std::collections::VecDeque;

use bevy::prelude::*;

use crate::session::SessionState;

const STATUS_LIFETIME_SECS: f32 = 5.0;
const MAX_STATUS_LINES: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusSeverity {
    Info,
    Warning,
}

impl StatusSeverity {
    fn color(self) -> Color {
        match self {
            StatusSeverity::Info => Color::srgb(0.2, 0.9, 0.3),
            StatusSeverity::Warning => Color::srgb(0.95, 0.25, 0.2),
        }
    }
}

/// Transient user-facing status line. Fire-and-forget.
#[derive(Message, Debug, Clone, PartialEq)]
pub struct StatusText {
    pub text: String,
    pub severity: StatusSeverity,
}

impl StatusText {
    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: StatusSeverity::Info,
        }
    }

    pub fn warning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            severity: StatusSeverity::Warning,
        }
    }
}

#[derive(Debug)]
pub struct StatusLine {
    pub text: String,
    pub severity: StatusSeverity,
    timer: Timer,
}

/// Most recent status lines, oldest first.
#[derive(Resource, Debug, Default)]
pub struct StatusFeed {
    lines: VecDeque<StatusLine>,
}

impl StatusFeed {
    pub fn push(&mut self, status: &StatusText) {
        if self.lines.len() == MAX_STATUS_LINES {
            self.lines.pop_front();
        }
        self.lines.push_back(StatusLine {
            text: status.text.clone(),
            severity: status.severity,
            timer: Timer::from_seconds(STATUS_LIFETIME_SECS, TimerMode::Once),
        });
    }

    /// Ages every line, dropping expired ones. Returns true if any expired.
    pub fn tick(&mut self, delta: std::time::Duration) -> bool {
        let before = self.lines.len();
        for line in &mut self.lines {
            line.timer.tick(delta);
        }
        self.lines.retain(|line| !line.timer.is_finished());
        self.lines.len() != before
    }

    pub fn lines(&self) -> impl Iterator<Item = &StatusLine> {
        self.lines.iter()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

pub fn collect_status(mut messages: MessageReader<StatusText>, mut feed: ResMut<StatusFeed>) {
    for status in messages.read() {
        match status.severity {
            StatusSeverity::Info => info!("{}", status.text),
            StatusSeverity::Warning => warn!("{}", status.text),
        }
        feed.push(status);
    }
}

pub fn expire_status(time: Res<Time>, mut feed: ResMut<StatusFeed>) {
    if feed.bypass_change_detection().tick(time.delta()) {
        feed.set_changed();
    }
}

#[derive(Component)]
pub struct StatusHud;

#[derive(Component)]
pub struct ScoreHud;

pub fn spawn_status_hud(mut commands: Commands) {
    commands.spawn((
        ScoreHud,
        Text::new("Score: 0"),
        TextFont {
            font_size: 20.0,
            ..default()
        },
        TextColor(Color::srgba(1.0, 1.0, 1.0, 0.9)),
        Node {
            position_type: PositionType::Absolute,
            right: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
    ));
    commands.spawn((
        StatusHud,
        Text::default(),
        TextFont {
            font_size: 16.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(10.0),
            top: Val::Px(10.0),
            ..default()
        },
    ));
}

pub fn update_status_hud(
    feed: Res<StatusFeed>,
    hud: Query<Entity, With<StatusHud>>,
    mut commands: Commands,
) {
    if !feed.is_changed() {
        return;
    }
    let Ok(hud) = hud.single() else {
        return;
    };

    commands.entity(hud).despawn_related::<Children>();
    commands.entity(hud).with_children(|parent| {
        for line in feed.lines() {
            parent.spawn((
                TextSpan::new(format!("{}\n", line.text)),
                TextFont {
                    font_size: 16.0,
                    ..default()
                },
                TextColor(line.severity.color()),
            ));
        }
    });
}

pub fn update_score_hud(
    session: Res<SessionState>,
    mut text_query: Query<&mut Text, With<ScoreHud>>,
) {
    let Ok(mut text) = text_query.single_mut() else {
        return;
    };

    **text = format!(
        "Score: {}  Coins: {} (value {})  Dragon balls: {}",
        session.score(),
        session.total_coins,
        session.total_coin_value,
        session.dragon_balls
    );
}
