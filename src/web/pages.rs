//! HTML page rendering

use axum::response::Html;

use super::paths::{ADD_PATH, HOME_PATH, LIST_PATH, LOGIN_PATH, LOGOUT_PATH, SIGNUP_PATH};
use crate::entity::Note;
use crate::forms::{FormErrors, LoginForm, NoteForm, SignupForm};
use crate::policy::Actor;

/// Escape text for use in HTML element content and attribute values
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

fn nav(actor: &Actor) -> String {
    match actor.user() {
        Some(user) => format!(
            "<nav><a href=\"{home}\">Главная</a> <a href=\"{list}\">Мои заметки</a> \
             <a href=\"{add}\">Добавить заметку</a> <span>{name}</span> \
             <form method=\"post\" action=\"{logout}\"><button type=\"submit\">Выйти</button></form></nav>",
            home = HOME_PATH,
            list = LIST_PATH,
            add = ADD_PATH,
            name = escape_html(&user.username),
            logout = LOGOUT_PATH,
        ),
        None => format!(
            "<nav><a href=\"{home}\">Главная</a> <a href=\"{login}\">Войти</a> \
             <a href=\"{signup}\">Регистрация</a></nav>",
            home = HOME_PATH,
            login = LOGIN_PATH,
            signup = SIGNUP_PATH,
        ),
    }
}

fn layout(title: &str, actor: &Actor, body: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n<html lang=\"ru\">\n<head><meta charset=\"utf-8\"><title>{title}</title></head>\n\
         <body>\n<header>{nav}</header>\n<main>\n{body}\n</main>\n</body>\n</html>\n",
        title = escape_html(title),
        nav = nav(actor),
        body = body,
    ))
}

fn field_errors(errors: &FormErrors, field: &str) -> String {
    let messages = errors.get(field);
    if messages.is_empty() {
        return String::new();
    }
    let items: String = messages
        .iter()
        .map(|m| format!("<li>{}</li>", escape_html(m)))
        .collect();
    format!("<ul class=\"errorlist\" data-field=\"{}\">{}</ul>", field, items)
}

fn input(label: &str, name: &str, kind: &str, value: &str, errors: &FormErrors) -> String {
    format!(
        "<p><label for=\"id_{name}\">{label}</label>{errs}\
         <input type=\"{kind}\" name=\"{name}\" id=\"id_{name}\" value=\"{value}\"></p>\n",
        label = label,
        name = name,
        kind = kind,
        value = escape_html(value),
        errs = field_errors(errors, name),
    )
}

pub fn home(actor: &Actor) -> Html<String> {
    let body = "<h1>Заметки</h1>\n<p>Личные заметки: записывайте, редактируйте, удаляйте. \
                Видны только вам.</p>";
    layout("Заметки", actor, body)
}

pub fn notes_list(actor: &Actor, notes: &[Note]) -> Html<String> {
    let mut body = String::from("<h1>Мои заметки</h1>\n");
    if notes.is_empty() {
        body.push_str("<p>Заметок пока нет.</p>\n");
    } else {
        body.push_str("<ol class=\"notes\">\n");
        for note in notes {
            body.push_str(&format!(
                "<li data-id=\"{}\"><a href=\"{}\">{}</a></li>\n",
                note.id,
                escape_html(&note.detail_path()),
                escape_html(&note.title)
            ));
        }
        body.push_str("</ol>\n");
    }
    layout("Мои заметки", actor, &body)
}

pub fn note_detail(actor: &Actor, note: &Note) -> Html<String> {
    let body = format!(
        "<article>\n<h1>{title}</h1>\n<div class=\"text\">{text}</div>\n\
         <p><a href=\"{edit}\">Редактировать</a> <a href=\"{delete}\">Удалить</a></p>\n</article>",
        title = escape_html(&note.title),
        text = escape_html(&note.text),
        edit = escape_html(&note.edit_path()),
        delete = escape_html(&note.delete_path()),
    );
    layout(&note.title, actor, &body)
}

/// Create or edit form, posting back to `action`
pub fn note_form(
    actor: &Actor,
    heading: &str,
    action: &str,
    form: &NoteForm,
    errors: &FormErrors,
) -> Html<String> {
    let body = format!(
        "<h1>{heading}</h1>\n<form method=\"post\" action=\"{action}\">\n{title}\
         <p><label for=\"id_text\">Текст</label>{text_errs}\
         <textarea name=\"text\" id=\"id_text\">{text}</textarea></p>\n{slug}\
         <button type=\"submit\">Сохранить</button>\n</form>",
        heading = escape_html(heading),
        action = escape_html(action),
        title = input("Заголовок", "title", "text", &form.title, errors),
        text_errs = field_errors(errors, "text"),
        text = escape_html(&form.text),
        slug = input("Адрес для страницы", "slug", "text", &form.slug, errors),
    );
    layout(heading, actor, &body)
}

pub fn delete_confirm(actor: &Actor, note: &Note) -> Html<String> {
    let body = format!(
        "<h1>Удалить заметку?</h1>\n<p>{title}</p>\n\
         <form method=\"post\" action=\"{action}\"><button type=\"submit\">Удалить</button></form>",
        title = escape_html(&note.title),
        action = escape_html(&note.delete_path()),
    );
    layout("Удаление заметки", actor, &body)
}

pub fn success(actor: &Actor) -> Html<String> {
    let body = format!(
        "<h1>Успешно!</h1>\n<p>Операция выполнена. <a href=\"{}\">К списку заметок</a></p>",
        LIST_PATH
    );
    layout("Успешно", actor, &body)
}

pub fn login(form: &LoginForm, errors: &FormErrors, next: Option<&str>) -> Html<String> {
    let action = match next {
        Some(next) => super::paths::login_redirect(next),
        None => LOGIN_PATH.to_string(),
    };
    let body = format!(
        "<h1>Вход</h1>\n{general}<form method=\"post\" action=\"{action}\">\n{username}{password}\
         <button type=\"submit\">Войти</button>\n</form>",
        general = field_errors(errors, "__all__"),
        action = escape_html(&action),
        username = input("Имя пользователя", "username", "text", &form.username, errors),
        password = input("Пароль", "password", "password", "", errors),
    );
    layout("Вход", &Actor::Anonymous, &body)
}

pub fn logged_out() -> Html<String> {
    let body = format!(
        "<h1>Вы вышли из системы</h1>\n<p><a href=\"{}\">Войти снова</a></p>",
        LOGIN_PATH
    );
    layout("Выход", &Actor::Anonymous, &body)
}

pub fn signup(form: &SignupForm, errors: &FormErrors) -> Html<String> {
    let body = format!(
        "<h1>Регистрация</h1>\n<form method=\"post\" action=\"{action}\">\n{username}{p1}{p2}\
         <button type=\"submit\">Зарегистрироваться</button>\n</form>",
        action = SIGNUP_PATH,
        username = input("Имя пользователя", "username", "text", &form.username, errors),
        p1 = input("Пароль", "password1", "password", "", errors),
        p2 = input("Подтверждение пароля", "password2", "password", "", errors),
    );
    layout("Регистрация", &Actor::Anonymous, &body)
}

pub fn not_found() -> Html<String> {
    layout(
        "Страница не найдена",
        &Actor::Anonymous,
        "<h1>404</h1>\n<p>Страница не найдена.</p>",
    )
}
