use super::*;

const LABEL_LEFT: f32 = 110.0;
const FIELD_LEFT: f32 = 300.0;
const FIELD_TOP: f32 = 80.0;
const ROW_SPACING: f32 = 50.0;
const FIELD_WIDTH: f32 = 140.0;
const FIELD_HEIGHT: f32 = 32.0;

/// Spawn the input form.
///
/// Layout (absolute positions in the 800×500 window):
/// ```text
/// ┌──────────────────────────────────────────────┐
/// │        Mass 1 (kg):       [ 2            ]   │
/// │        Velocity 1 (m/s):  [ 3            ]   │
/// │        Mass 2 (kg):       [ 1            ]   │
/// │        Velocity 2 (m/s):  [ -2           ]   │
/// │                                              │
/// │                   [ Start Simulation ]       │
/// │                   status line                │
/// └──────────────────────────────────────────────┘
/// ```
pub fn setup_input_form(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                ..default()
            },
            InputFormRoot,
        ))
        .with_children(|root| {
            for slot in FieldSlot::ALL {
                spawn_field_row(root, slot);
            }

            root.spawn((
                Button,
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(320.0),
                    top: Val::Px(300.0),
                    width: Val::Px(160.0),
                    height: Val::Px(40.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                BackgroundColor(start_bg()),
                StartButton,
            ))
            .with_children(|btn| {
                btn.spawn((
                    Text::new("Start Simulation"),
                    TextFont {
                        font_size: UI_FONT_SIZE,
                        ..default()
                    },
                    TextColor(start_text()),
                ));
            });

            root.spawn((
                Text::new(""),
                TextFont {
                    font_size: UI_FONT_SIZE * 0.8,
                    ..default()
                },
                TextColor(status_error_color()),
                Node {
                    position_type: PositionType::Absolute,
                    left: Val::Px(LABEL_LEFT),
                    top: Val::Px(355.0),
                    ..default()
                },
                FormStatusText,
            ));
        });
}

fn spawn_field_row(root: &mut ChildSpawnerCommands<'_>, slot: FieldSlot) {
    let row = slot.row() as f32;

    root.spawn((
        Text::new(slot.label()),
        TextFont {
            font_size: UI_FONT_SIZE,
            ..default()
        },
        TextColor(label_color()),
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(LABEL_LEFT),
            top: Val::Px(FIELD_TOP + 4.0 + row * ROW_SPACING),
            ..default()
        },
        FieldLabel(slot),
    ));

    let field = InputField::new(slot);
    let initial_text = field.display_text();
    root.spawn((
        Button,
        Node {
            position_type: PositionType::Absolute,
            left: Val::Px(FIELD_LEFT),
            top: Val::Px(FIELD_TOP + row * ROW_SPACING),
            width: Val::Px(FIELD_WIDTH),
            height: Val::Px(FIELD_HEIGHT),
            align_items: AlignItems::Center,
            padding: UiRect::left(Val::Px(5.0)),
            border: UiRect::all(Val::Px(2.0)),
            overflow: Overflow::clip(),
            ..default()
        },
        BackgroundColor(field_bg()),
        BorderColor::all(field_border()),
        field,
    ))
    .with_children(|f| {
        f.spawn((
            Text::new(initial_text),
            TextFont {
                font_size: UI_FONT_SIZE,
                ..default()
            },
            TextColor(field_text()),
        ));
    });
}

/// Recursively despawn the form.
pub fn cleanup_input_form(mut commands: Commands, query: Query<Entity, With<InputFormRoot>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn();
    }
}

/// Wake the event loop at a low fixed rate while the form is idle, so the
/// caret keeps blinking without rendering at full speed.
pub fn enable_form_redraw(mut commands: Commands, config: Res<SimConfig>) {
    let wait = Duration::from_secs_f32(1.0 / config.form_redraw_hz);
    commands.insert_resource(WinitSettings {
        focused_mode: UpdateMode::reactive_low_power(wait),
        unfocused_mode: UpdateMode::reactive_low_power(wait),
    });
}

// ── Update (InputForm only) ───────────────────────────────────────────────────

/// On every left click, each field becomes active exactly when the click
/// landed on it.  Clicking elsewhere (including the start button) unfocuses
/// every field, so at most one field is ever active.
pub fn field_focus_system(
    mouse: Res<ButtonInput<MouseButton>>,
    mut fields: Query<(&Interaction, &mut InputField)>,
) {
    if !mouse.just_pressed(MouseButton::Left) {
        return;
    }
    for (interaction, mut field) in fields.iter_mut() {
        let clicked = *interaction == Interaction::Pressed;
        if field.active != clicked {
            field.set_active(clicked);
        }
    }
}

/// Route key presses to the active field.
pub fn field_keyboard_system(
    mut keys: MessageReader<KeyboardInput>,
    mut fields: Query<&mut InputField>,
) {
    for event in keys.read() {
        if event.state != ButtonState::Pressed {
            continue;
        }
        for mut field in fields.iter_mut() {
            if field.active {
                field.apply_key(&event.logical_key);
            }
        }
    }
}

pub fn caret_blink_system(
    time: Res<Time>,
    config: Res<SimConfig>,
    mut fields: Query<&mut InputField>,
) {
    let dt = time.delta_secs();
    for mut field in fields.iter_mut() {
        let mut caret = field.caret;
        caret.tick(dt, config.caret_blink_secs);
        // Only a flip needs a repaint.
        if caret.visible != field.caret.visible {
            field.caret = caret;
        } else {
            field.bypass_change_detection().caret = caret;
        }
    }
}

/// Repaint changed fields: background highlight and text with caret.
pub fn field_visual_system(
    mut fields: Query<(&InputField, &mut BackgroundColor, &Children), Changed<InputField>>,
    mut texts: Query<&mut Text>,
) {
    for (field, mut bg, children) in fields.iter_mut() {
        *bg = BackgroundColor(if field.active {
            field_active_bg()
        } else {
            field_bg()
        });
        for child in children.iter() {
            if let Ok(mut text) = texts.get_mut(child) {
                text.0 = field.display_text();
            }
        }
    }
}

/// Labels turn red while their field is focused.
pub fn field_label_color_system(
    fields: Query<&InputField>,
    mut labels: Query<(&FieldLabel, &mut TextColor)>,
) {
    for (label, mut color) in labels.iter_mut() {
        let active = fields.iter().any(|f| f.slot == label.0 && f.active);
        let wanted = if active {
            label_active_color()
        } else {
            label_color()
        };
        if color.0 != wanted {
            *color = TextColor(wanted);
        }
    }
}

/// Validate the form; on success publish [`CollisionInputs`] and request
/// [`AppState::Running`].
///
/// Returns the rejection so the caller can show it.
pub fn submit_form(
    commands: &mut Commands,
    next_state: &mut NextState<AppState>,
    inputs: CollisionInputs,
) -> SimResult<()> {
    inputs.validate()?;
    if inputs.mass1 <= 0.0 || inputs.mass2 <= 0.0 {
        warn!(
            "Non-positive mass entered (m1 = {}, m2 = {}); running anyway",
            inputs.mass1, inputs.mass2
        );
    }
    info!(
        "Starting simulation: m1 = {} kg, u1 = {} m/s, m2 = {} kg, u2 = {} m/s",
        inputs.mass1, inputs.velocity1, inputs.mass2, inputs.velocity2
    );
    commands.insert_resource(inputs);
    next_state.set(AppState::Running);
    Ok(())
}

/// Handle the start button: hover tint, and submission on press.
#[allow(clippy::type_complexity)]
pub fn start_button_system(
    mut commands: Commands,
    mut start_query: Query<
        (&Interaction, &mut BackgroundColor),
        (Changed<Interaction>, With<StartButton>),
    >,
    fields: Query<&InputField>,
    mut status: Query<&mut Text, With<FormStatusText>>,
    mut next_state: ResMut<NextState<AppState>>,
) {
    for (interaction, mut bg) in start_query.iter_mut() {
        match interaction {
            Interaction::Pressed => {
                let inputs = CollisionInputs::from_fields(fields.iter());
                if let Err(err) = submit_form(&mut commands, &mut next_state, inputs) {
                    warn!("Rejected input: {err}");
                    for mut text in status.iter_mut() {
                        text.0 = err.to_string();
                    }
                }
            }
            Interaction::Hovered => {
                *bg = BackgroundColor(start_hover_bg());
            }
            Interaction::None => {
                *bg = BackgroundColor(start_bg());
            }
        }
    }
}
